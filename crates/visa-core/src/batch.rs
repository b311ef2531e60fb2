//! Per-batch extraction context.
//!
//! A `Batch` owns its documents and returns its own outcome, so two batches
//! never share state. Documents are independent; running them in parallel
//! needs no synchronisation and keeps submission order.

use std::thread;

use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::extract::{document_name, VisaExtractor, VisaParser};
use crate::models::{EmptyDocumentPolicy, VisaRecord};

/// One materialised input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// File name or other label; the record name is derived from it.
    pub identifier: String,
    /// First-page text, or `None` when the source has no text layer.
    pub text: Option<String>,
}

impl SourceDocument {
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: Some(text.into()),
        }
    }

    /// A document whose source yielded no text layer.
    pub fn without_text(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: None,
        }
    }
}

/// Outcome for a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub identifier: String,
    pub result: Result<VisaRecord, ExtractionError>,
}

/// Outcomes for a whole batch, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub entries: Vec<BatchEntry>,
}

impl BatchOutcome {
    /// Successfully extracted records.
    pub fn records(&self) -> impl Iterator<Item = &VisaRecord> {
        self.entries.iter().filter_map(|e| e.result.as_ref().ok())
    }

    /// Documents that failed, with their error.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ExtractionError)> {
        self.entries
            .iter()
            .filter_map(|e| e.result.as_ref().err().map(|err| (e.identifier.as_str(), err)))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Rows to hand to a sink, one per document in order.
    ///
    /// Failed documents are dropped or written as a name-only row depending
    /// on `policy`.
    pub fn rows(&self, policy: EmptyDocumentPolicy) -> Vec<VisaRecord> {
        self.entries
            .iter()
            .filter_map(|entry| match (&entry.result, policy) {
                (Ok(record), _) => Some(record.clone()),
                (Err(_), EmptyDocumentPolicy::Skip) => None,
                (Err(_), EmptyDocumentPolicy::NameOnly) => {
                    Some(VisaRecord::new(document_name(&entry.identifier)))
                }
            })
            .collect()
    }
}

/// A set of documents processed together.
pub struct Batch<'p, E: VisaExtractor + Sync = VisaParser> {
    extractor: &'p E,
    documents: Vec<SourceDocument>,
}

impl<'p, E: VisaExtractor + Sync> Batch<'p, E> {
    pub fn new(extractor: &'p E) -> Self {
        Self {
            extractor,
            documents: Vec::new(),
        }
    }

    pub fn push(&mut self, document: SourceDocument) {
        self.documents.push(document);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Process every document in order on the current thread.
    pub fn run(self) -> BatchOutcome {
        let extractor = self.extractor;
        let entries = self
            .documents
            .into_iter()
            .map(|doc| process_document(extractor, doc))
            .collect();
        BatchOutcome { entries }
    }

    /// Process documents on up to `jobs` threads.
    ///
    /// Documents are split into contiguous chunks, so joining the chunks in
    /// spawn order restores submission order.
    pub fn run_parallel(self, jobs: usize) -> BatchOutcome {
        let jobs = jobs.max(1);
        if jobs == 1 || self.documents.len() <= 1 {
            return self.run();
        }

        let extractor = self.extractor;
        let chunk_size = self.documents.len().div_ceil(jobs);
        debug!(
            "Running {} documents on {} threads ({} per chunk)",
            self.documents.len(),
            jobs,
            chunk_size
        );

        let mut documents = self.documents;
        let mut chunks = Vec::new();
        while !documents.is_empty() {
            let rest = documents.split_off(chunk_size.min(documents.len()));
            chunks.push(std::mem::replace(&mut documents, rest));
        }

        let entries: Vec<BatchEntry> = thread::scope(|scope| {
            let handles: Vec<_> = chunks
                .into_iter()
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .into_iter()
                            .map(|doc| process_document(extractor, doc))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(entries) => entries,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        BatchOutcome { entries }
    }
}

fn process_document<E: VisaExtractor>(extractor: &E, doc: SourceDocument) -> BatchEntry {
    let result = match doc.text {
        Some(text) => extractor.parse(&text, &doc.identifier).map(|r| r.record),
        None => Err(ExtractionError::NoTextLayer {
            identifier: doc.identifier.clone(),
        }),
    };

    if let Err(err) = &result {
        warn!("{}: {}", doc.identifier, err);
    }

    BatchEntry {
        identifier: doc.identifier,
        result,
    }
}
