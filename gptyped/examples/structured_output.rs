//! Structured output example.
//!
//! Extracts a typed `Person` and a `ReviewAnalysis` from free text.
//!
//! Run with:
//! ```bash
//! OPENAI_API_KEY=your-key cargo run --example structured_output
//! ```
//!
//! Without `OPENAI_API_KEY` the example falls back to a canned local
//! transport so the whole pipeline can still be watched end to end. Set
//! `RUST_LOG=gptyped=debug` to see every stage.

use std::sync::Arc;

use gptyped::prelude::*;
use gptyped::BoxedTransport;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// A person's information extracted from text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Email address if provided.
    pub email: Option<String>,
    /// Occupation.
    pub occupation: String,
    /// List of skills.
    pub skills: Vec<String>,
}

/// A product review analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAnalysis {
    /// Sentiment: positive, negative, or neutral.
    pub sentiment: String,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f64,
    /// Key positive points.
    pub pros: Vec<String>,
    /// Key negative points.
    pub cons: Vec<String>,
    /// Overall summary.
    pub summary: String,
}

fn person_schema() -> ShapeSchema<Person> {
    ShapeSchema::new(
        ObjectShape::new()
            .field("name", Field::new(Shape::string()).describe("full name"))
            .field("age", Field::new(Shape::integer().minimum(0.0)).describe("age in years"))
            .optional("email", Shape::string())
            .required("occupation", Shape::string())
            .required("skills", Shape::array(Shape::string())),
    )
    .with_coercion(true)
}

fn review_schema() -> ShapeSchema<ReviewAnalysis> {
    ShapeSchema::new(
        ObjectShape::new()
            .required(
                "sentiment",
                Shape::enumeration(["positive", "negative", "neutral"]),
            )
            .required("confidence", Shape::number().minimum(0.0).maximum(1.0))
            .required("pros", Shape::array(Shape::string()))
            .required("cons", Shape::array(Shape::string()))
            .required("summary", Shape::string()),
    )
}

/// The real model when a key is configured, canned replies otherwise.
fn transport() -> BoxedTransport {
    match OpenAIChatTransport::from_env() {
        Ok(openai) => Arc::new(openai.with_model("gpt-4o-mini")),
        Err(e) => {
            tracing::warn!(error = %e, "falling back to the offline transport");
            Arc::new(FunctionTransport::cycle(vec![
                "Sure! Here is the person:\n```json\n{\n  \"name\": \"Sarah Johnson\",\n  \"age\": \"28\",\n  \"email\": \"sarah.j@email.com\",\n  \"occupation\": \u{201C}software engineer\u{201D},\n  \"skills\": [\"Rust\", \"Python\", \"TypeScript\"]\n}\n```".to_string(),
                "{\"sentiment\": \"positive\", \"confidence\": 0.8, \"pros\": [\"sound quality\", \"battery life\"], \"cons\": [\"heavy\", \"buggy app\"], \"summary\": \"A solid choice for music lovers.\"}".to_string(),
            ]))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let transport = transport();
    println!("Structured Output Example (transport: {})\n", transport.name());

    println!("=== Example 1: Person Extraction ===");
    extract_person(transport.clone()).await?;

    println!("\n=== Example 2: Review Analysis ===");
    analyze_review(transport).await?;

    Ok(())
}

async fn extract_person(transport: BoxedTransport) -> anyhow::Result<()> {
    let prompter = ObjectPrompter::for_shape(transport, person_schema())
        .metaprompt("You are a data extraction specialist. Extract the person described in the input.")
        .reminder("Use null for anything the text does not mention.")
        .log_prompt(true)
        .build();

    let text = "Hi, I'm Sarah Johnson! I'm a 28-year-old software engineer working at \
                TechCorp. You can reach me at sarah.j@email.com. I'm proficient in Rust, \
                Python, and TypeScript.";

    let person = prompter.send(&json!({ "text": text })).await?;

    println!("\nExtracted Person:");
    println!("  Name: {}", person.name);
    println!("  Age: {}", person.age);
    println!("  Email: {:?}", person.email);
    println!("  Occupation: {}", person.occupation);
    println!("  Skills: {:?}", person.skills);

    Ok(())
}

async fn analyze_review(transport: BoxedTransport) -> anyhow::Result<()> {
    let prompter = ObjectPrompter::for_shape(transport, review_schema())
        .metaprompt("You are a product review analyst. Analyze the review in the input.")
        .memory("Confidence is a probability between 0 and 1.")
        .build();

    let review = "The sound quality is amazing and the battery lasts about 40 hours. \
                  However, the headphones are a bit heavy and the app crashes occasionally.";

    match prompter.send(review).await {
        Ok(analysis) => {
            println!("\nAnalysis:");
            println!(
                "  Sentiment: {} (confidence: {:.0}%)",
                analysis.sentiment,
                analysis.confidence * 100.0
            );
            println!("  Pros: {:?}", analysis.pros);
            println!("  Cons: {:?}", analysis.cons);
            println!("  Summary: {}", analysis.summary);
        }
        Err(PromptError::SchemaMismatch(e)) => {
            for issue in &e.issues {
                println!("  invalid: {issue}");
            }
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
