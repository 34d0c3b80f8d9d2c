use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use serde::Serialize;
use serde_json::json;
use shared::FEATURE_COUNT;

use crate::inference::InferenceService;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    field: String,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/predict").route(web::post().to(handle_predict)))
        .service(web::resource("/api/schema").route(web::get().to(get_schema)))
        .service(web::resource("/api/health").route(web::get().to(health)));
}

async fn handle_predict(
    service: web::Data<InferenceService>,
    payload: web::Json<HashMap<String, f64>>,
) -> HttpResponse {
    match service.predict(&payload) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse {
            error: e.to_string(),
            field: e.field().to_string(),
        }),
    }
}

/// Field metadata (name, active bounds, dashboard default) so a presentation
/// layer can render inputs without hardcoding the schema.
async fn get_schema(service: web::Data<InferenceService>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "feature_count": FEATURE_COUNT,
        "fields": service.limits().as_slice(),
    }))
}

/// Artifacts are loaded before the listener binds, so liveness doubles as
/// readiness.
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use shared::FeatureVector;

    use super::*;
    use crate::artifacts::classifier::Classifier;
    use crate::artifacts::scaler::Scaler;

    struct IdentityScaler;
    impl Scaler for IdentityScaler {
        fn scale(&self, fv: &FeatureVector) -> FeatureVector {
            *fv
        }
    }

    struct FixedClassifier(u8, [f64; 2]);
    impl Classifier for FixedClassifier {
        fn classify(&self, _fv: &FeatureVector) -> (u8, [f64; 2]) {
            (self.0, self.1)
        }
    }

    fn app_data(class: u8, probs: [f64; 2]) -> web::Data<InferenceService> {
        web::Data::new(InferenceService::new(
            Box::new(IdentityScaler),
            Box::new(FixedClassifier(class, probs)),
        ))
    }

    fn default_body() -> serde_json::Value {
        serde_json::to_value(FeatureVector::default_input()).unwrap()
    }

    #[actix_web::test]
    async fn predict_happy_path() {
        let app = test::init_service(
            App::new()
                .app_data(app_data(1, [0.2, 0.8]))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/predict")
            .set_json(default_body())
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["label"], "GOOD");
        assert_eq!(body["confidence"], 0.8);
        assert_eq!(body["input"]["pH"], 3.3);
    }

    #[actix_web::test]
    async fn predict_missing_field_names_the_field() {
        let app = test::init_service(
            App::new()
                .app_data(app_data(0, [0.65, 0.35]))
                .configure(configure_routes),
        )
        .await;

        let mut body = default_body();
        body.as_object_mut().unwrap().remove("density");
        let req = test::TestRequest::post()
            .uri("/api/predict")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["field"], "density");
    }

    #[actix_web::test]
    async fn schema_lists_all_fields_in_order() {
        let app = test::init_service(
            App::new()
                .app_data(app_data(1, [0.2, 0.8]))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/schema").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["feature_count"], 11);
        let fields = body["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 11);
        assert_eq!(fields[0]["name"], "fixed_acidity");
        assert_eq!(fields[8]["name"], "pH");
        assert_eq!(fields[10]["default"], 9.4);
    }

    #[actix_web::test]
    async fn health_is_ok() {
        let app = test::init_service(
            App::new()
                .app_data(app_data(1, [0.2, 0.8]))
                .configure(configure_routes),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}
