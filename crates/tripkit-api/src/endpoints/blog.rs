use crate::client::ApiClient;
use crate::error::Error;
use crate::models::BlogPost;

impl ApiClient {
    pub async fn blog_post_by_slug(&self, slug: &str) -> Result<BlogPost, Error> {
        self.get(&format!("blogs/slug/{slug}")).await
    }
}
