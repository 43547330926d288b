#![cfg(feature = "postgres")]

use categories_core::fake::CategoryFakeBuilder;
use categories_core::model::Category;
use categories_core::{CategoryId, CategorySearchParams};
use chrono::{SubsecRound, TimeDelta, Utc};
use engine::{EntityValidationError, RepoError, Repository, SearchableRepository, SortDirection};
use repositories::postgres::ConnectionDetails;
use repositories::postgres::categories::CategoryRepo;
use repositories::postgres::initializer::RepoCreator;
use rstest::rstest;
use testcontainers_modules::postgres::Postgres;
use testcontainers_modules::testcontainers::ContainerAsync;
use testcontainers_modules::testcontainers::runners::AsyncRunner;

struct TestRuntime {
    _container: ContainerAsync<Postgres>,
    repo: CategoryRepo,
    url: String,
}

async fn runtime() -> TestRuntime {
    let container = Postgres::default()
        .with_db_name("categories")
        .with_user("testuser")
        .with_password("testpass")
        .start()
        .await
        .unwrap();
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();

    let url = format!("postgresql://testuser:testpass@{host}:{port}/categories");

    let repo = RepoCreator::default()
        .with_categories()
        .create(ConnectionDetails::Url(url.clone()), Some(2))
        .await
        .unwrap();

    TestRuntime {
        _container: container,
        repo,
        url,
    }
}

/// Client outside the repository, for writing rows the domain would reject.
async fn raw_client(url: &str) -> tokio_postgres::Client {
    let (client, connection) = tokio_postgres::connect(url, tokio_postgres::NoTls)
        .await
        .unwrap();
    tokio::spawn(connection);
    client
}

fn names(categories: &[Category]) -> Vec<&str> {
    categories.iter().map(Category::name).collect()
}

fn named(raw: &[&'static str]) -> Vec<Category> {
    let base = Utc::now().trunc_subsecs(3);
    let raw = raw.to_vec();
    CategoryFakeBuilder::many(raw.len())
        .with_name(move |i| raw[i].to_string())
        .with_created_at(move |i| base + TimeDelta::seconds(i as i64))
        .build()
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn insert_then_find_by_id_round_trips_every_field() {
    let TestRuntime {
        _container,
        mut repo,
        ..
    } = runtime().await;
    let category = CategoryFakeBuilder::one().deactivate().build_one();

    repo.insert(category.clone()).await.unwrap();

    let found = repo
        .find_by_id(category.category_id())
        .await
        .unwrap()
        .expect("inserted category exists");
    assert_eq!(category.name(), found.name());
    assert_eq!(category.description(), found.description());
    assert_eq!(category.is_active(), found.is_active());
    assert_eq!(category.created_at(), found.created_at());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn find_by_id_unknown_returns_none() {
    let runtime = runtime().await;

    let found = runtime.repo.find_by_id(&CategoryId::new()).await.unwrap();

    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn bulk_insert_then_find_all() {
    let TestRuntime {
        _container,
        mut repo,
        ..
    } = runtime().await;

    repo.bulk_insert(named(&["a", "b", "c"])).await.unwrap();

    assert_eq!(vec!["a", "b", "c"], names(&repo.find_all().await.unwrap()));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn update_and_delete_existing() {
    let TestRuntime {
        _container,
        mut repo,
        ..
    } = runtime().await;
    let mut category = CategoryFakeBuilder::one().build_one();
    repo.insert(category.clone()).await.unwrap();

    category.change_name("renamed").unwrap();
    category.change_description(None);
    repo.update(category.clone()).await.unwrap();
    let found = repo
        .find_by_id(category.category_id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!("renamed", found.name());
    assert_eq!(None, found.description());

    repo.delete(category.category_id()).await.unwrap();
    assert!(
        repo.find_by_id(category.category_id())
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn update_and_delete_missing_are_not_found() {
    let TestRuntime {
        _container,
        mut repo,
        ..
    } = runtime().await;
    let stranger = CategoryFakeBuilder::one().build_one();

    let update = repo.update(stranger.clone()).await.unwrap_err();
    let delete = repo.delete(stranger.category_id()).await.unwrap_err();

    assert!(update.current_context().is_not_found());
    assert!(delete.current_context().is_not_found());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn search_default_params_returns_first_fifteen() {
    let TestRuntime {
        _container,
        mut repo,
        ..
    } = runtime().await;
    let base = Utc::now().trunc_subsecs(3);
    let categories = CategoryFakeBuilder::many(16)
        .with_name(|_| "Movie".to_string())
        .with_created_at(move |i| base + TimeDelta::milliseconds(i as i64))
        .build();
    repo.bulk_insert(categories.clone()).await.unwrap();

    let result = repo.search(CategorySearchParams::new()).await.unwrap();

    assert_eq!(15, result.items.len());
    assert_eq!(16, result.total);
    assert_eq!(2, result.last_page);
    assert_eq!(&categories[15], &result.items[0]);
}

#[rstest]
#[case::first_page(1, vec!["a", "b"])]
#[case::second_page(2, vec!["c", "d"])]
#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn search_sorts_by_name_ascending(#[case] page: u64, #[case] expected: Vec<&str>) {
    let TestRuntime {
        _container,
        mut repo,
        ..
    } = runtime().await;
    repo.bulk_insert(named(&["b", "a", "d", "e", "c"]))
        .await
        .unwrap();
    let params = CategorySearchParams::new()
        .with_page(page)
        .with_per_page(2)
        .with_sort("name")
        .with_sort_dir(SortDirection::Asc);

    let result = repo.search(params).await.unwrap();

    assert_eq!(expected, names(&result.items));
    assert_eq!(5, result.total);
    assert_eq!(3, result.last_page);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn search_filter_is_case_insensitive_and_literal() {
    let TestRuntime {
        _container,
        mut repo,
        ..
    } = runtime().await;
    repo.bulk_insert(named(&["test", "a", "TEST", "TeSt", "50% off"]))
        .await
        .unwrap();

    let by_name = repo
        .search(CategorySearchParams::new().with_filter("TEST".to_string()))
        .await
        .unwrap();
    let by_wildcard = repo
        .search(CategorySearchParams::new().with_filter("%".to_string()))
        .await
        .unwrap();

    assert_eq!(3, by_name.total);
    assert_eq!(vec!["TeSt", "TEST", "test"], names(&by_name.items));
    assert_eq!(vec!["50% off"], names(&by_wildcard.items));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn search_sorts_names_case_sensitively() {
    let TestRuntime {
        _container,
        mut repo,
        ..
    } = runtime().await;
    repo.bulk_insert(named(&["b", "B", "a"])).await.unwrap();
    let params = CategorySearchParams::new()
        .with_sort("name")
        .with_sort_dir(SortDirection::Asc);

    let result = repo.search(params).await.unwrap();

    assert_eq!(vec!["B", "a", "b"], names(&result.items));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn search_pages_over_equal_timestamps_without_overlap() {
    let TestRuntime {
        _container,
        mut repo,
        ..
    } = runtime().await;
    let created_at = Utc::now().trunc_subsecs(3);
    let categories = CategoryFakeBuilder::many(16)
        .with_name(|_| "Movie".to_string())
        .with_created_at(move |_| created_at)
        .build();
    repo.bulk_insert(categories.clone()).await.unwrap();

    let first = repo.search(CategorySearchParams::new()).await.unwrap();
    let second = repo
        .search(CategorySearchParams::new().with_page(2))
        .await
        .unwrap();

    let mut seen: Vec<CategoryId> = first
        .items
        .iter()
        .chain(second.items.iter())
        .map(|c| *c.category_id())
        .collect();
    seen.sort_by_key(|id| id.to_string());
    seen.dedup();
    assert_eq!(15, first.items.len());
    assert_eq!(1, second.items.len());
    assert_eq!(16, seen.len());
    assert_eq!(first, repo.search(CategorySearchParams::new()).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn invalid_persisted_row_is_invalid_data() {
    let TestRuntime {
        _container,
        repo,
        url,
    } = runtime().await;
    let id = CategoryId::new();
    let client = raw_client(&url).await;
    client
        .execute(
            "insert into categories (category_id, name, description, is_active, created_at) \
             values ($1, '', null, true, now())",
            &[id.as_uuid()],
        )
        .await
        .unwrap();

    let err = repo.find_by_id(&id).await.unwrap_err();

    assert_eq!(
        &RepoError::InvalidData { entity: "Category" },
        err.current_context()
    );
    let validation = err
        .downcast_ref::<EntityValidationError>()
        .expect("validation error is attached");
    assert!(validation.errors().get("name").is_some());
}
