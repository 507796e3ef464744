//! Basic client example
//!
//! Fetches a resource with a query string, then uploads a file as multipart.
//! Requests and responses are traced, including the equivalent `curl` command.
//!
//! Run with: cargo run --example basic

use declarative_connect::{
    ConnectClient, ConnectRequest, ContentType, Endpoint, HttpMethod, MultipartData,
    NetworkError, Params,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Post {
    id: u32,
    title: String,
}

struct PostsByUser {
    user_id: u32,
}

impl ConnectRequest for PostsByUser {
    type Output = Vec<Post>;

    fn path(&self) -> String {
        "/posts".into()
    }

    fn query_params(&self) -> Option<Params> {
        Some(Params::new().with("userId", self.user_id))
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("Declarative Connect Basic Example");
    println!("=================================\n");

    let client = ConnectClient::new("https://jsonplaceholder.typicode.com");

    match client.dispatch(PostsByUser { user_id: 1 }).await {
        Ok(posts) => {
            println!("Received {} posts", posts.len());
            for post in posts.iter().take(3) {
                println!("  #{} {}", post.id, post.title);
            }
        }
        Err(e) => println!("Listing failed: {}", e),
    }

    let upload = Endpoint::<serde_json::Value>::new("/posts")
        .with_method(HttpMethod::Post)
        .with_content_type(ContentType::Multipart)
        .with_body("title", "hello")
        .with_attachment(MultipartData::new(
            "file",
            "attachment contents",
            "notes.txt",
            "text/plain",
        ));

    match client.dispatch(upload).await {
        Ok(created) => println!("\nUpload accepted: {}", created),
        Err(NetworkError::TransportFailed(e)) => println!("\nNetwork unavailable: {}", e),
        Err(e) => println!("\nUpload rejected ({:?}): {}", e.status_code(), e),
    }
}
