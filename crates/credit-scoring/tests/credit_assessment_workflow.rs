//! Integration specifications for the credit assessment workflow.
//!
//! Scenarios run through the public service facade, the file-backed journal, and the HTTP
//! router so intake, eligibility, scoring, and persistence are exercised together.

mod common {
    use std::path::Path;
    use std::sync::Arc;

    use credit_scoring::assessment::{
        ApplicantRecord, CreditAssessmentService, JsonFileJournal, ScoringConfig,
    };

    pub(super) fn approved_applicant() -> ApplicantRecord {
        ApplicantRecord::builder()
            .name("Beatriz Lopes")
            .age(42)
            .education("Mestrado")
            .marital_status("União Estável")
            .monthly_income(3_000.0)
            .years_working(12)
            .years_unemployed(0)
            .family_size(4)
            .children_count(2)
            .own_property(true)
            .own_car(true)
            .build()
            .expect("complete applicant")
    }

    pub(super) fn denied_applicant() -> ApplicantRecord {
        ApplicantRecord::builder()
            .age(21)
            .education("Ensino Fundamental")
            .marital_status("Solteiro")
            .annual_income(6_000.0)
            .years_working(0)
            .years_unemployed(2)
            .family_size(1)
            .children_count(0)
            .build()
            .expect("complete applicant")
    }

    pub(super) fn file_service(
        path: &Path,
    ) -> (CreditAssessmentService<JsonFileJournal>, Arc<JsonFileJournal>) {
        let journal = Arc::new(JsonFileJournal::open(path));
        let service = CreditAssessmentService::new(journal.clone(), ScoringConfig::default());
        (service, journal)
    }
}

mod scoring {
    use super::common::*;
    use credit_scoring::assessment::ScoreFactor;

    #[test]
    fn long_tenure_applicant_is_approved() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (service, _) = file_service(&dir.path().join("credit_requests.json"));

        let breakdown = service
            .assess(approved_applicant())
            .expect("assessment succeeds");

        // 100 age + 150 income + 90 education + 100 work + 50 property + 30 car
        assert_eq!(breakdown.result.score, 520.0);
        assert!(breakdown.result.approved);
        assert_eq!(breakdown.result.max_monthly_commitment, 900.0);
        assert_eq!(breakdown.points_for(ScoreFactor::WorkHistory), 100.0);
    }

    #[test]
    fn thin_profile_is_denied_but_still_gets_affordability() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (service, _) = file_service(&dir.path().join("credit_requests.json"));

        let breakdown = service
            .assess(denied_applicant())
            .expect("assessment succeeds");

        // 45 age + 45 income + 20 education
        assert_eq!(breakdown.result.score, 110.0);
        assert!(!breakdown.result.approved);
        assert_eq!(breakdown.result.max_monthly_commitment, 150.0);
    }
}

mod journal {
    use super::common::*;
    use credit_scoring::assessment::{
        AssessmentServiceError, DecisionJournal, EligibilityViolation,
    };

    #[test]
    fn journal_survives_reopening() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("credit_requests.json");

        {
            let (service, _) = file_service(&path);
            service.assess(approved_applicant()).expect("first");
            service.assess(denied_applicant()).expect("second");
        }

        let (service, journal) = file_service(&path);
        service.assess(approved_applicant()).expect("third");

        let entries = journal.load_all().expect("journal loads");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].applicant.name.as_deref(), Some("Beatriz Lopes"));
        assert!(entries[1].applicant.name.is_none());

        let statistics = service.statistics().expect("statistics");
        assert_eq!(statistics.total, 3);
        assert_eq!(statistics.approved, 2);
    }

    #[test]
    fn rejected_submissions_never_reach_the_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("credit_requests.json");
        let (service, _) = file_service(&path);

        let mut record = approved_applicant();
        record.age = 17;

        match service.assess(record) {
            Err(AssessmentServiceError::Eligibility(EligibilityViolation::BelowMinimumAge {
                age,
                minimum_age,
            })) => assert_eq!((age, minimum_age), (17, 18)),
            other => panic!("expected minimum age violation, got {other:?}"),
        }
        assert!(!path.exists());
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use credit_scoring::assessment::{assessment_router, DecisionJournal};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn read_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json")
    }

    #[tokio::test]
    async fn form_payload_with_integer_flags_is_assessed() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (service, journal) = file_service(&dir.path().join("credit_requests.json"));
        let router = assessment_router(Arc::new(service));

        let payload = json!({
            "name": "Dora Nunes",
            "age": 33,
            "education_type": "Superior Completo",
            "marital_status": "Casado",
            "own_car": 1,
            "own_property": 0,
            "own_workphone": 1,
            "annual_income": 18000.0,
            "years_working": 4,
            "years_unemployed": 0,
            "family_size": 2,
            "children_count": 0
        });

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/credit/assessments")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&payload).expect("serialize")))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        // 100 age + 135 income + 70 education + 40 work + 30 car + 20 workphone
        assert_eq!(body["score"], json!(395.0));
        assert_eq!(body["approved"], json!(true));

        let entries = journal.load_all().expect("journal loads");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].applicant.own_car);
        assert!(!entries[0].applicant.own_property);
    }

    #[tokio::test]
    async fn statistics_route_reports_counts() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (service, _) = file_service(&dir.path().join("credit_requests.json"));
        service.assess(approved_applicant()).expect("approved");
        service.assess(denied_applicant()).expect("denied");
        let router = assessment_router(Arc::new(service));

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/credit/statistics")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["total"], json!(2));
        assert_eq!(body["approval_rate"], json!(50.0));
        assert_eq!(body["scores"], json!([520.0, 110.0]));
    }
}
