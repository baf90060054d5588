use std::sync::Arc;

use clap::Args;
use colle_storage::booking::{derive, validate_draft, ContractDraft};
use colle_storage::catalog::{AddonId, StorageCatalog, VehicleType, CONTACT_EMAIL};
use colle_storage::contact::{mailto_link, ContactMessage};
use colle_storage::contract::{
    BuildError, ContractBuilder, DocumentModel, MemoryDocumentEngine, MemoryUrlAllocator,
    PreviewSlot,
};
use colle_storage::l10n::{format_date, resolve_language, Language};

use crate::error::AppError;
use crate::infra::BundledTemplateSource;

#[derive(Args, Debug, Default)]
pub(crate) struct SeasonArgs {
    /// Print a single language (en or fr) instead of both
    #[arg(long)]
    pub(crate) lang: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Contract language (en or fr)
    #[arg(long, default_value = "en")]
    pub(crate) lang: String,
    /// Season to book, by id or display label
    #[arg(long, default_value = "winter")]
    pub(crate) season: String,
}

pub(crate) fn run_season_tables(args: SeasonArgs) -> Result<(), AppError> {
    let catalog = StorageCatalog::standard();
    let languages = match args.lang {
        Some(raw) => vec![resolve_language(Some(&raw), None, None)],
        None => Language::all().to_vec(),
    };

    for language in languages {
        println!("Published rates [{}]", language.key());

        for season in catalog.seasons() {
            let card = season.card(language);
            println!("\n{} | {}", card.label, card.timeframe);
            println!("  {}", card.description);
            println!(
                "  Drop-off {} | pickup by {}",
                card.dropoff_window, card.pickup_deadline
            );
            println!("  {}", card.deposit_note);
            for row in &card.rows {
                match &row.note {
                    Some(note) => println!("  - {} ({}): {}", row.label, note, row.price),
                    None => println!("  - {}: {}", row.label, row.price),
                }
            }
            for policy in &card.policies {
                println!("  * {}", policy);
            }
        }

        println!("\nAdd-on services");
        for addon in catalog.addons() {
            let card = addon.card(language);
            println!(
                "  - {}: {} ({})",
                card.label,
                card.fee,
                card.vehicle_keys.join(", ")
            );
        }
        println!();
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let language = resolve_language(Some(&args.lang), None, None);
    let catalog = Arc::new(StorageCatalog::standard());
    let draft = sample_draft(&args.season);

    println!("Colle Storage booking demo");
    println!(
        "Tenant {} | season {} | vehicle {} ({} ft)",
        draft.tenant_name,
        draft.season,
        draft.vehicle_type.map(VehicleType::key).unwrap_or("-"),
        draft.vehicle_length
    );

    let derived = derive(&catalog, &draft);
    println!("\nLive estimate");
    if let Some(text) = derived.lease_duration_text(language) {
        println!("- Lease window: {text}");
    }
    if let Some(text) = derived.estimate_text(language) {
        println!("- Seasonal price: {text}");
    }
    if let Some(text) = derived.deposit_text(language) {
        println!("- Deposit due at drop-off: {text}");
    }
    if let Some(floor) = derived.insurance_expiry_floor {
        println!(
            "- Insurance must stay valid until {}",
            format_date(floor, language)
        );
    }

    if let Err(failure) = validate_draft(&catalog, &draft) {
        println!("\nDraft incomplete: {}", failure.message(language));
        return Ok(());
    }
    println!("\nDraft complete, generating the agreement");

    let builder = ContractBuilder::new(
        catalog.clone(),
        Arc::new(BundledTemplateSource),
        Arc::new(MemoryDocumentEngine),
    );
    let contract = builder.build(&draft, language).await?;
    println!("- Number: {}", contract.number);
    println!("- File: {} ({} bytes)", contract.filename, contract.bytes.len());

    let document = DocumentModel::from_bytes(&contract.bytes).map_err(BuildError::from)?;
    println!("- Pages: {}", document.page_count());
    if let Some(cost) = document.text_value("estimated_cost") {
        println!("- Printed estimate: {cost}");
    }
    if let Some(window) = document.text_value("lease_duration") {
        println!("- Printed window: {window}");
    }

    let previews = Arc::new(MemoryUrlAllocator::new());
    let mut slot = PreviewSlot::new(previews.clone());
    let first = slot.publish(&contract.bytes).to_string();
    println!("\nPreview published at {first}");

    let regenerated = builder.build(&draft, language).await?;
    let second = slot.publish(&regenerated.bytes).to_string();
    println!("Regenerated as {} | republished at {second}", regenerated.number);
    println!(
        "Live previews: {} | first URL {}",
        previews.live_count(),
        if previews.bytes(&first).is_some() {
            "still live"
        } else {
            "revoked"
        }
    );

    let question = ContactMessage {
        name: draft.tenant_name.clone(),
        email: draft.tenant_email.clone(),
        vehicle: format!(
            "{} {} ft",
            draft.vehicle_type.map(VehicleType::key).unwrap_or("-"),
            draft.vehicle_length
        ),
        message: match language {
            Language::En => "Is an early pickup possible in March?".to_string(),
            Language::Fr => "Une reprise h\u{e2}tive en mars est-elle possible?".to_string(),
        },
    };
    println!(
        "\nFollow-up contact link:\n{}",
        mailto_link(CONTACT_EMAIL, &question, language)
    );

    Ok(())
}

fn sample_draft(season: &str) -> ContractDraft {
    let mut draft = ContractDraft {
        tenant_name: "Nathalie Roy".to_string(),
        tenant_phone: "450 491 3327".to_string(),
        tenant_email: "nathalie.roy@videotron.ca".to_string(),
        street: "88 rue Saint-Louis".to_string(),
        city: "Deux-Montagnes".to_string(),
        province: "QC".to_string(),
        postal_code: "J7R 1T6".to_string(),
        season: season.to_string(),
        vehicle_type: Some(VehicleType::Car),
        vehicle_length: "16".to_string(),
        insurance_company: "Promutuel".to_string(),
        policy_number: "PA-2210457".to_string(),
        insurance_expiry: "2026-08-15".to_string(),
        notes: "Keys in the glovebox".to_string(),
        ..ContractDraft::default()
    };
    draft.addons.insert(AddonId::Battery);
    draft
}
