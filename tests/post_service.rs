//! Pagination envelope and search behavior of the post service.

mod common;

use gazette::application::pagination::{PageRequest, SortDirection, SortField, SortSpec};
use gazette::application::repos::UpdatePostPatch;

use common::{cached_service, create_params};

#[tokio::test]
async fn twenty_five_records_paginate_into_two_pages() {
    let (service, _, _) = cached_service();
    for i in 0..25 {
        service
            .create_post(create_params(&format!("Post {i:02}"), "body"))
            .await
            .expect("create");
    }

    let first = service
        .get_page(PageRequest::new(0, 20, SortSpec::created_desc()))
        .await
        .expect("first page");
    assert_eq!(first.items.len(), 20);
    assert_eq!(first.total_elements, 25);
    assert_eq!(first.total_pages, 2);
    assert!(first.first);
    assert!(!first.last);

    let second = service
        .get_page(PageRequest::new(1, 20, SortSpec::created_desc()))
        .await
        .expect("second page");
    assert_eq!(second.items.len(), 5);
    assert!(!second.first);
    assert!(second.last);
}

#[tokio::test]
async fn identical_page_requests_load_once_and_match() {
    let (service, repo, _) = cached_service();
    for i in 0..3 {
        service
            .create_post(create_params(&format!("Post {i}"), "body"))
            .await
            .expect("create");
    }

    let request = PageRequest::new(0, 20, SortSpec::created_desc());
    let first = service.get_page(request).await.expect("first call");
    let second = service.get_page(request).await.expect("second call");

    assert_eq!(first, second);
    assert_eq!(repo.find_page_count(), 1);
}

#[tokio::test]
async fn different_sorts_are_cached_independently() {
    let (service, repo, _) = cached_service();
    service
        .create_post(create_params("Bravo", "body"))
        .await
        .expect("create");
    service
        .create_post(create_params("Alpha", "body"))
        .await
        .expect("create");

    let by_created = service
        .get_page(PageRequest::new(0, 20, SortSpec::created_desc()))
        .await
        .expect("created page");
    let by_title = service
        .get_page(PageRequest::new(
            0,
            20,
            SortSpec::new(SortField::Title, SortDirection::Asc),
        ))
        .await
        .expect("title page");

    assert_eq!(by_created.items.len(), 2);
    assert_eq!(by_title.items[0].title, "Alpha");
    assert_eq!(by_title.items[1].title, "Bravo");
    assert_eq!(repo.find_page_count(), 2);
}

#[tokio::test]
async fn list_items_carry_the_summary_projection() {
    let (service, _, _) = cached_service();
    let long_body = "word ".repeat(100);
    let mut params = create_params("Title", long_body.trim());
    params.image_file = Some("cover.png".to_string());
    service.create_post(params).await.expect("create");

    let page = service
        .get_page(PageRequest::new(0, 20, SortSpec::created_desc()))
        .await
        .expect("page");
    let summary = &page.items[0];
    assert!(summary.excerpt.ends_with("..."));
    assert!(summary.excerpt.chars().count() <= 153);
    assert_eq!(summary.image_url.as_deref(), Some("/uploads/cover.png"));
    assert_eq!(summary.author_name, "ada");
}

#[tokio::test]
async fn equivalent_search_queries_share_one_cache_entry() {
    let (service, repo, _) = cached_service();
    service
        .create_post(create_params("Rust caching", "body"))
        .await
        .expect("create");

    let first = service.search_by_title("  Rust Caching ").await.expect("search");
    let second = service.search_by_title("rust   caching").await.expect("search");

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
    assert_eq!(repo.search_title_count(), 1);
}

#[tokio::test]
async fn text_search_reaches_into_the_body() {
    let (service, _, _) = cached_service();
    service
        .create_post(create_params("Cooking", "a note about invalidation"))
        .await
        .expect("create");

    let by_title = service.search_by_title("invalidation").await.expect("search");
    assert!(by_title.is_empty());

    let by_text = service.search_by_text("invalidation").await.expect("search");
    assert_eq!(by_text.len(), 1);
    assert_eq!(by_text[0].title, "Cooking");
}

#[tokio::test]
async fn patch_updates_only_present_fields() {
    let (service, _, _) = cached_service();
    let post = service
        .create_post(create_params("Title", "Body"))
        .await
        .expect("create");

    let updated = service
        .update_post(
            post.id,
            UpdatePostPatch {
                body: Some("New body".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.title, "Title");
    assert_eq!(updated.body, "New body");
    assert!(updated.updated_at >= post.updated_at);
    assert_eq!(updated.created_at, post.created_at);
}
