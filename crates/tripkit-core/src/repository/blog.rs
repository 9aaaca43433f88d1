use std::sync::Arc;

use super::Repository;
use crate::error::CoreError;
use crate::model::BlogPost;
use crate::store::cache::DETAIL;

impl Repository<BlogPost> {
    pub async fn by_slug(&self, slug: &str) -> Result<Arc<BlogPost>, CoreError> {
        let ticket = self.cache().begin_fetch(DETAIL);
        match self.api().blog_post_by_slug(slug).await {
            Ok(post) => Ok(self.commit_selected(ticket, post)),
            Err(e) => {
                let err = CoreError::from(e);
                let err = if err.is_not_found() {
                    CoreError::not_found("blog post", slug)
                } else {
                    err
                };
                Err(Self::read_failed(ticket, err))
            }
        }
    }
}
