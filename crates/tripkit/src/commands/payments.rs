//! Payment command handlers.

use tabled::Tabled;
use tripkit_core::{Controller, EntityId, Payment, PaymentStats};

use crate::cli::{GlobalOpts, PaymentsArgs, PaymentsCommand};
use crate::error::CliError;
use crate::output;

use super::crud::{self, Present};
use super::util;

#[derive(Tabled)]
pub struct PaymentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Booking")]
    booking: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Reference")]
    reference: String,
}

impl Present for Payment {
    type Row = PaymentRow;

    fn row(&self) -> PaymentRow {
        PaymentRow {
            id: self.id.to_string(),
            booking: self.booking_id.to_string(),
            customer: self.customer_name.clone(),
            amount: format!("{} {}", util::money(self.amount), self.currency),
            method: self.method.to_string(),
            status: self.status.to_string(),
            reference: self.transaction_ref.clone(),
        }
    }

    fn detail(&self) -> String {
        output::detail_lines(&[
            ("ID", self.id.to_string()),
            ("Booking", self.booking_id.to_string()),
            (
                "Customer",
                format!("{} <{}>", self.customer_name, self.customer_email),
            ),
            (
                "Amount",
                format!("{} {}", util::money(self.amount), self.currency),
            ),
            ("Method", self.method.to_string()),
            ("Status", self.status.to_string()),
            ("Reference", self.transaction_ref.clone()),
            (
                "Paid at",
                self.paid_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            ),
        ])
    }
}

fn stats_detail(s: &PaymentStats) -> String {
    output::detail_lines(&[
        ("Revenue", util::money(s.total_revenue)),
        ("Completed", s.completed.to_string()),
        ("Pending", s.pending.to_string()),
        ("Failed", s.failed.to_string()),
        ("Refunded", s.refunded.to_string()),
    ])
}

pub async fn handle(
    controller: &Controller,
    args: PaymentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let repo = controller.payments();
    match args.command {
        PaymentsCommand::Crud(cmd) => crud::crud(repo, cmd, global).await,

        PaymentsCommand::Stats { refresh } => {
            let stats = repo.stats(refresh || global.no_cache).await?;
            let out = output::render_single(&global.output, &stats, stats_detail, |s| {
                util::money(s.total_revenue)
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PaymentsCommand::Status { id, status } => {
            let payment = repo.update_status(&EntityId::from(id), status).await?;
            crud::print_one(&payment, global)
        }

        PaymentsCommand::Refund { id, reason } => {
            if !util::confirm(&format!("Refund payment '{id}'?"), global.yes)? {
                return Ok(());
            }
            let payment = repo.refund(&EntityId::from(id), reason.as_deref()).await?;
            crud::print_one(&payment, global)
        }
    }
}
