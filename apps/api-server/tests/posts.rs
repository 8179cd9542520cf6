mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use api_server::observability::REQUEST_ID_HEADER;
use blog_core::ports::BaseRepository;
use blog_shared::dto::{PostDetail, PostListItem};
use common::{TestContext, test_app};

#[actix_web::test]
async fn test_get_all_posts() {
    let ctx = TestContext::new();
    let author = ctx.create_user("author #1").await;
    let mut expected = Vec::new();
    for title in ["First blog post", "Second blog post", "Third blog post"] {
        expected.push(PostListItem::from(ctx.create_post(&author, title, "text").await));
    }
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/posts/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Vec<PostListItem> = test::read_body_json(resp).await;
    assert_eq!(body, expected);
}

#[actix_web::test]
async fn test_list_is_empty_without_posts() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/posts/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn test_list_uses_list_projection() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    ctx.create_post(&author, "First blog post", "Post Description")
        .await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/posts/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let item = body[0].as_object().unwrap();
    assert!(!item.contains_key("text"));
    assert_eq!(item["author"], json!(author.id));
    assert_eq!(item["is_published"], json!(false));
}

#[actix_web::test]
async fn test_get_valid_single_post() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    let post = ctx.create_post(&author, "First blog post", "").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}/", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: PostDetail = test::read_body_json(resp).await;
    assert_eq!(body, PostDetail::from(post));
}

#[actix_web::test]
async fn test_get_invalid_single_post() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/posts/9999/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_non_numeric_id_is_not_found() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/posts/abc/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_valid_single_post() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/posts/")
        .set_json(json!({
            "title": "First blog post",
            "text": "Blog Post Description",
            "author": author.id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: PostDetail = test::read_body_json(resp).await;
    assert_eq!(body.title, "First blog post");
    assert_eq!(body.text, "Blog Post Description");
    assert_eq!(body.author, author.id);
    assert!(!body.is_published);

    let stored = ctx.db.posts().find_by_id(body.id).await.unwrap().unwrap();
    assert_eq!(stored.created_date, body.created_date);
}

#[actix_web::test]
async fn test_create_invalid_single_post() {
    let ctx = TestContext::new();
    ctx.create_user("test").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/posts/")
        .set_json(json!({ "title": "First blog post", "author": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["text"], json!(["This field is required."]));
    assert_eq!(
        body["errors"]["author"],
        json!(["Invalid pk \"2\" - object does not exist."])
    );
    assert!(ctx.db.posts().list().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_create_with_malformed_json() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/posts/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"title\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_valid_update_post() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    let post = ctx
        .create_post(&author, "First blog post", "Post Description")
        .await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/", post.id))
        .set_json(json!({
            "title": "First blog post",
            "text": "Blog Post Description",
            "author": author.id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: PostDetail = test::read_body_json(resp).await;
    assert_eq!(body.text, "Blog Post Description");
    assert_eq!(body.created_date, post.created_date);
}

#[actix_web::test]
async fn test_put_updates_post() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    let post = ctx
        .create_post(&author, "First blog post", "Post Description")
        .await;
    let app = test_app!(ctx);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}/", post.id))
        .set_json(json!({ "title": "Renamed", "text": "New text", "author": author.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let stored = ctx.db.posts().find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Renamed");
}

#[actix_web::test]
async fn test_invalid_update_post() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    let post = ctx
        .create_post(&author, "First blog post", "Post Description")
        .await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/", post.id))
        .set_json(json!({ "title": "First blog post", "text": null, "author": author.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let stored = ctx.db.posts().find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "Post Description");
}

#[actix_web::test]
async fn test_update_missing_post() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/posts/9999/")
        .set_json(json!({ "title": "T", "text": "x", "author": author.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_partial_update_post() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    let post = ctx
        .create_post(&author, "First blog post", "Post Description")
        .await;
    let app = test_app!(ctx);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/posts/{}/", post.id))
        .set_json(json!({ "title": "Renamed" }))
        .to_request();
    let body: PostDetail = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.title, "Renamed");
    assert_eq!(body.text, "Post Description");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/posts/{}/", post.id))
        .set_json(json!({ "text": null }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_valid_delete_post() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    let post = ctx
        .create_post(&author, "First blog post", "Post Description")
        .await;
    let app = test_app!(ctx);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}/", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(test::read_body(resp).await.is_empty());

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}/", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invalid_delete_post() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::delete().uri("/api/posts/9999/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_post_removes_its_comments() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    let post = ctx
        .create_post(&author, "First blog post", "Post Description")
        .await;
    ctx.create_comment(Some(&post), "First!").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}/", post.id))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/comments/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn test_unauth_publish_post() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    let post = ctx
        .create_post(&author, "First blog post", "Post Description")
        .await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/publish/", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let stored = ctx.db.posts().find_by_id(post.id).await.unwrap().unwrap();
    assert!(!stored.is_published);
}

#[actix_web::test]
async fn test_non_author_publish_post() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    let stranger = ctx.create_user("stranger").await;
    let post = ctx
        .create_post(&author, "First blog post", "Post Description")
        .await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/publish/", post.id))
        .insert_header(ctx.bearer(&stranger))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_authenticated_publish_post() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    let post = ctx
        .create_post(&author, "First blog post", "Post Description")
        .await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/publish/", post.id))
        .insert_header(ctx.bearer(&author))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: PostDetail = test::read_body_json(resp).await;
    assert!(body.is_published);
    assert!(body.published_date.is_some());

    let stored = ctx.db.posts().find_by_id(post.id).await.unwrap().unwrap();
    assert!(stored.is_published);
}

#[actix_web::test]
async fn test_publish_missing_post() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/posts/9999/publish/")
        .insert_header(ctx.bearer(&author))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_unmatched_route_is_problem_document() {
    let ctx = TestContext::new();
    let author = ctx.create_user("test").await;
    let post = ctx.create_post(&author, "First blog post", "").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], json!(404));
    assert_eq!(body["title"], json!("Not Found"));
}

#[actix_web::test]
async fn test_unsupported_method_is_problem_document() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::delete().uri("/api/posts/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], json!(405));

    let req = test::TestRequest::get().uri("/api/posts/1/publish/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::test]
async fn test_error_responses_carry_request_id() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/posts/")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));

    let req = test::TestRequest::get()
        .uri("/api/posts/9999/")
        .insert_header((REQUEST_ID_HEADER, "missing-post"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "missing-post");

    let req = test::TestRequest::get().uri("/api/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
}
