//! Admin intake against the catalog store.

mod support;

use std::sync::Arc;

use folio::application::{Intake, ProjectForm, Rejection, SubmitOutcome};
use folio::domain::{ProjectId, PLACEHOLDER_IMAGE};
use folio::port::CatalogChange;

use support::catalog::Fixture;

fn form(title: &str, description: &str) -> ProjectForm {
    ProjectForm {
        title: title.to_string(),
        description: description.to_string(),
        ..ProjectForm::default()
    }
}

fn fixed_ids(fx: &Fixture, id: &'static str) -> Intake {
    Intake::with_ids(Arc::clone(&fx.store), Box::new(move || id.to_string()))
}

#[tokio::test]
async fn valid_form_is_stored_with_split_tags_and_placeholder_image() {
    let fx = Fixture::new();
    let intake = fixed_ids(&fx, "p-1");

    let outcome = intake
        .submit(ProjectForm {
            tags: " Rust,Tokio , ,Serde".to_string(),
            github_url: "https://github.com/example/folio".to_string(),
            ..form("Folio", "Portfolio catalog tool")
        })
        .await
        .unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Added {
            id: "p-1".to_string()
        }
    );

    let project = fx.store.get(&ProjectId::new("p-1")).await.unwrap().unwrap();
    assert_eq!(project.tags, vec!["Rust", "Tokio", "Serde"]);
    assert_eq!(project.image, PLACEHOLDER_IMAGE);
    assert_eq!(
        project.github_url.as_deref(),
        Some("https://github.com/example/folio")
    );
    assert!(project.live_url.is_none());
    assert_eq!(
        fx.invalidator.changes(),
        vec![CatalogChange::Added {
            id: ProjectId::new("p-1")
        }]
    );
}

#[tokio::test]
async fn every_invalid_field_is_reported_and_nothing_is_written() {
    let fx = Fixture::new();
    let intake = fixed_ids(&fx, "p-1");

    let outcome = intake
        .submit(ProjectForm {
            image: "placeholder".to_string(),
            live_url: "example.com".to_string(),
            github_url: "https://github.com/example".to_string(),
            ..form("ab", "too short")
        })
        .await
        .unwrap();

    let SubmitOutcome::Invalid(errors) = &outcome else {
        panic!("expected invalid form, got {outcome:?}");
    };
    assert_eq!(
        errors.fields(),
        vec!["title", "description", "image", "live_url"]
    );
    assert_eq!(
        errors.message("description"),
        Some("Description must be at least 10 characters")
    );
    assert_eq!(errors.message("live_url"), Some("Please enter a valid URL"));
    assert_eq!(fx.blobs.puts(), 0);
    assert!(fx.invalidator.is_empty());
}

#[tokio::test]
async fn minted_ids_list_newest_first() {
    let fx = Fixture::new();
    let intake = Intake::new(Arc::clone(&fx.store));

    for title in ["Oldest", "Middle", "Newest"] {
        let outcome = intake
            .submit(form(title, "A project worth listing"))
            .await
            .unwrap();
        assert!(outcome.is_success());
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let titles: Vec<_> = fx
        .store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
}

#[tokio::test]
async fn missing_credential_is_a_rejection() {
    let fx = Fixture::unconfigured();
    let intake = fixed_ids(&fx, "p-1");

    let outcome = intake
        .submit(form("Folio", "Portfolio catalog tool"))
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        SubmitOutcome::Rejected {
            reason: Rejection::Unconfigured { .. },
            ..
        }
    ));
    assert!(!outcome.is_success());
}
