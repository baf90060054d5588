use axum::extract::Query;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use colle_storage::booking::{derive, validate_draft, ContractDraft};
use colle_storage::catalog::{
    vehicle_options, AddonCard, AddonId, SeasonCard, VehicleOption, VehicleType, CONTACT_EMAIL,
};
use colle_storage::contact::{mailto_link, ContactMessage};
use colle_storage::l10n::{resolve_language, Language};
use colle_storage::pricing::PriceResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;
use crate::infra::AppState;

/// Header the storefront forwards with the visitor's saved language choice.
pub(crate) const LANGUAGE_PREF_HEADER: &str = "x-language-pref";

pub(crate) fn router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/seasons", axum::routing::get(seasons_endpoint))
        .route("/api/v1/quotes", axum::routing::post(quote_endpoint))
        .route("/api/v1/contracts", axum::routing::post(contract_endpoint))
        .route(
            "/api/v1/contact-link",
            axum::routing::get(contact_link_endpoint),
        )
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LanguageParams {
    pub(crate) lang: Option<String>,
}

fn language_for(lang: Option<&str>, headers: &HeaderMap) -> Language {
    let stored = headers
        .get(LANGUAGE_PREF_HEADER)
        .and_then(|value| value.to_str().ok());
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());
    resolve_language(lang, stored, host)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// The storefront's data feed: everything the rate-card pages and the booking
/// form selectors show, already rendered in one language.
#[derive(Debug, Serialize)]
pub(crate) struct SeasonsResponse {
    pub(crate) language: &'static str,
    pub(crate) seasons: Vec<SeasonCard>,
    pub(crate) addons: Vec<AddonCard>,
    pub(crate) vehicles: Vec<VehicleOption>,
}

pub(crate) async fn seasons_endpoint(
    Extension(state): Extension<AppState>,
    Query(params): Query<LanguageParams>,
    headers: HeaderMap,
) -> Json<SeasonsResponse> {
    let language = language_for(params.lang.as_deref(), &headers);
    Json(SeasonsResponse {
        language: language.key(),
        seasons: state
            .catalog
            .seasons()
            .iter()
            .map(|season| season.card(language))
            .collect(),
        addons: state
            .catalog
            .addons()
            .iter()
            .map(|addon| addon.card(language))
            .collect(),
        vehicles: vehicle_options(language),
    })
}

/// A draft fragment, just the entries that drive pricing. Unknown vehicle or
/// add-on keys read as unset so a stale storefront build cannot fail a quote.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct QuoteRequest {
    pub(crate) season: String,
    pub(crate) vehicle_type: Option<String>,
    pub(crate) vehicle_length: String,
    pub(crate) addons: Vec<String>,
}

impl QuoteRequest {
    fn into_draft(self) -> ContractDraft {
        ContractDraft {
            season: self.season,
            vehicle_type: self
                .vehicle_type
                .as_deref()
                .and_then(VehicleType::from_key),
            vehicle_length: self.vehicle_length,
            addons: self
                .addons
                .iter()
                .filter_map(|raw| AddonId::from_key(raw))
                .collect(),
            ..ContractDraft::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct QuoteResponse {
    pub(crate) language: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) price_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) deposit_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) lease_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) minimum_insurance_expiry: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) price: Option<PriceResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) deposit: Option<Decimal>,
}

pub(crate) async fn quote_endpoint(
    Extension(state): Extension<AppState>,
    Query(params): Query<LanguageParams>,
    headers: HeaderMap,
    Json(payload): Json<QuoteRequest>,
) -> Json<QuoteResponse> {
    let language = language_for(params.lang.as_deref(), &headers);
    let draft = payload.into_draft();
    let derived = derive(&state.catalog, &draft);

    Json(QuoteResponse {
        language: language.key(),
        price_text: derived.estimate_text(language),
        deposit_text: derived.deposit_text(language),
        lease_duration: derived.lease_duration_text(language),
        minimum_insurance_expiry: derived.insurance_expiry_floor,
        price: derived.estimate,
        deposit: derived.deposit,
    })
}

pub(crate) async fn contract_endpoint(
    Extension(state): Extension<AppState>,
    Query(params): Query<LanguageParams>,
    headers: HeaderMap,
    Json(draft): Json<ContractDraft>,
) -> Result<impl IntoResponse, AppError> {
    let language = language_for(params.lang.as_deref(), &headers);
    validate_draft(&state.catalog, &draft)?;

    // One build at a time, so agreement numbers leave in request order.
    let _slot = state.build_slot.lock().await;
    let contract = state.builder.build(&draft, language).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", contract.filename),
            ),
        ],
        contract.bytes,
    ))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ContactLinkParams {
    pub(crate) lang: Option<String>,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) vehicle: String,
    pub(crate) message: String,
}

pub(crate) async fn contact_link_endpoint(
    Query(params): Query<ContactLinkParams>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    let language = language_for(params.lang.as_deref(), &headers);
    let message = ContactMessage {
        name: params.name,
        email: params.email,
        vehicle: params.vehicle,
        message: params.message,
    };
    Json(json!({ "mailto": mailto_link(CONTACT_EMAIL, &message, language) }))
}
