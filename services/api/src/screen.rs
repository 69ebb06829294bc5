use clap::Args;
use denboard::error::AppError;
use denboard::workflows::booking::{
    EligibilityEngine, EligibilityReport, PetDescriptor, PetEligibility,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Breed as the owner typed it
    #[arg(long, default_value = "")]
    pub(crate) breed: String,
    /// Weight in pounds (0 when unknown)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) weight: f64,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file containing an array of {"breed", "weight"} objects
    #[arg(long)]
    pub(crate) pets: PathBuf,
    /// Apply the first-stay policy for clients without an approved booking
    #[arg(long)]
    pub(crate) new_client: bool,
}

pub(crate) fn run_classify(args: ClassifyArgs, engine: &EligibilityEngine) -> Result<(), AppError> {
    let result = engine.classify(&args.breed, args.weight);
    println!("{}", render_classification(&args.breed, args.weight, &result));
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs, engine: &EligibilityEngine) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.pets)?;
    let pets: Vec<PetDescriptor> = serde_json::from_str(&raw)?;
    let report = engine.assess(&pets, args.new_client);
    println!("{}", render_report(&pets, &report));
    Ok(())
}

fn status_label(result: &PetEligibility) -> &'static str {
    match result {
        PetEligibility::Clear => "CLEAR",
        PetEligibility::MeetGreetRequired(_) => "MEET & GREET",
        PetEligibility::Blocked(_) => "BLOCKED",
    }
}

fn describe_pet(pet: &PetDescriptor) -> String {
    let breed = if pet.breed.trim().is_empty() {
        "unknown breed"
    } else {
        pet.breed.trim()
    };
    if pet.weight > 0.0 {
        format!("{breed}, {} lbs", pet.weight)
    } else {
        breed.to_string()
    }
}

pub(crate) fn render_classification(breed: &str, weight: f64, result: &PetEligibility) -> String {
    let pet = PetDescriptor::new(breed, weight);
    let mut line = format!("{:<13} {}", status_label(result), describe_pet(&pet));
    if let Some(message) = result.message() {
        line.push_str(&format!("\n              {message}"));
    }
    line
}

pub(crate) fn render_report(pets: &[PetDescriptor], report: &EligibilityReport) -> String {
    let mut lines = Vec::with_capacity(pets.len() + 3);
    for (pet, result) in pets.iter().zip(&report.pets) {
        lines.push(render_classification(&pet.breed, pet.weight, result));
    }
    lines.push(String::new());
    lines.push(format!("Decision: {}", report.decision.summary()));
    if report.decision.can_proceed() {
        lines.push(format!(
            "Booking status on submit: {}",
            report.decision.booking_status().label()
        ));
    }
    if let Some(notice) = report.notice {
        lines.push(notice.message().to_string());
    }
    lines.join("\n")
}
