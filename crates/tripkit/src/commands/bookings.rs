//! Booking command handlers.

use tabled::Tabled;
use tripkit_core::{Booking, BookingPayment, BookingStats, Controller, EntityId, NewBookingPayment};

use crate::cli::{BookingsArgs, BookingsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::crud::{self, Present};
use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct BookingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Tour")]
    tour: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Paid")]
    paid: String,
    #[tabled(rename = "Total")]
    total: String,
}

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Paid At")]
    paid_at: String,
}

fn payment_row(p: &BookingPayment) -> PaymentRow {
    PaymentRow {
        amount: util::money(p.amount),
        method: p.method.to_string(),
        reference: p.reference.clone().unwrap_or_default(),
        paid_at: p
            .paid_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
    }
}

impl Present for Booking {
    type Row = BookingRow;

    fn row(&self) -> BookingRow {
        BookingRow {
            id: self.id.to_string(),
            reference: self.reference.clone(),
            customer: self.customer.name.clone(),
            tour: self.tour_title.clone().unwrap_or_default(),
            start: self.start_date.to_string(),
            status: self.status.to_string(),
            paid: self.payment_status.to_string(),
            total: format!("{} {}", util::money(self.total_amount), self.currency),
        }
    }

    fn detail(&self) -> String {
        output::detail_lines(&[
            ("ID", self.id.to_string()),
            ("Reference", self.reference.clone()),
            (
                "Customer",
                format!("{} <{}>", self.customer.name, self.customer.email),
            ),
            ("Tour", self.tour_title.clone().unwrap_or_default()),
            ("Start", self.start_date.to_string()),
            (
                "End",
                self.end_date.map(|d| d.to_string()).unwrap_or_default(),
            ),
            ("Participants", self.participants.len().to_string()),
            ("Status", self.status.to_string()),
            ("Payment", self.payment_status.to_string()),
            (
                "Total",
                format!("{} {}", util::money(self.total_amount), self.currency),
            ),
            ("Balance due", util::money(self.balance_due())),
            ("Notes", self.notes.clone().unwrap_or_default()),
        ])
    }
}

fn stats_detail(s: &BookingStats) -> String {
    output::detail_lines(&[
        ("Total", s.total.to_string()),
        ("Pending", s.pending.to_string()),
        ("Confirmed", s.confirmed.to_string()),
        ("Cancelled", s.cancelled.to_string()),
        ("Completed", s.completed.to_string()),
        ("Revenue", util::money(s.total_revenue)),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: BookingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let repo = controller.bookings();
    match args.command {
        BookingsCommand::Crud(cmd) => crud::crud(repo, cmd, global).await,

        BookingsCommand::Stats { refresh } => {
            let stats = repo.stats(refresh || global.no_cache).await?;
            let out = output::render_single(&global.output, &stats, stats_detail, |s| {
                s.total.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BookingsCommand::Status { id, status } => {
            let booking = repo.update_status(&EntityId::from(id), status).await?;
            crud::print_one(&booking, global)
        }

        BookingsCommand::Cancel { id, reason } => {
            if !util::confirm(&format!("Cancel booking '{id}'?"), global.yes)? {
                return Ok(());
            }
            let booking = repo.cancel(&EntityId::from(id), reason.as_deref()).await?;
            crud::print_one(&booking, global)
        }

        BookingsCommand::Payments { id } => {
            let payments = repo.payments(&EntityId::from(id)).await?;
            let out = output::render_list(
                &global.output,
                &payments,
                payment_row,
                |p| p.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BookingsCommand::AddPayment {
            id,
            amount,
            method,
            reference,
        } => {
            let payment = NewBookingPayment {
                amount,
                method,
                reference,
            };
            let booking = repo.add_payment(&EntityId::from(id), &payment).await?;
            crud::print_one(&booking, global)
        }
    }
}
