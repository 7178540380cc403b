//! Collaborator implementations available to the server binary.

pub mod unconfigured;

pub use unconfigured::{
    UnconfiguredDocumentRenderer, UnconfiguredMailer, UnconfiguredSentimentScorer,
    UnconfiguredSummarizer,
};
