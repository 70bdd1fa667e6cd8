//! Static corpora used across harnesses.

use crate::common::builders::{EngineBuilder, FaqEntryBuilder};
use faqs::{Corpus, FaqEngine};

/// Two categories, four entries. Small enough to reason about every flag by
/// hand in an assertion.
pub fn billing_engine() -> FaqEngine {
    EngineBuilder::new()
        .category("account", "Account")
        .category("billing", "Deposits & Withdrawals")
        .entry(
            FaqEntryBuilder::new("open-account", "How do I open an account?")
                .category("account")
                .paragraph("Register online and verify your identity.")
                .list_item("A valid photo ID")
                .list_item("Proof of address"),
        )
        .entry(
            FaqEntryBuilder::new("min-deposit", "What is the minimum deposit?")
                .category("billing")
                .paragraph("The minimum first deposit is $100 (approx.) in your account currency."),
        )
        .entry(
            FaqEntryBuilder::new("fees", "Fees")
                .category("billing")
                .paragraph("Deposits are free.")
                .paragraph("A 2% withdrawal fee applies to card withdrawals."),
        )
        .entry(
            FaqEntryBuilder::new("withdrawal-time", "How long does a withdrawal take?")
                .category("billing")
                .paragraph("Usually one to three business days."),
        )
        .build()
}

/// The corpus the binary ships with.
pub fn embedded_engine() -> FaqEngine {
    FaqEngine::from(Corpus::embedded())
}

/// A minimal valid corpus file.
pub const SMALL_CORPUS_TOML: &str = r#"
messages = ["Welcome"]

[[categories]]
id = "billing"
label = "Billing"

[[categories]]
id = "account"
label = "Account"

[[entries]]
id = "fees"
category = "billing"
question = "What fees do you charge?"
answer = "A 2% withdrawal fee applies."

[[entries]]
id = "close"
category = "account"
question = "How do I close my account?"
answer = [
  { text = "Contact support." },
  { kind = "list_item", text = "Withdraw remaining funds first" },
]
"#;
