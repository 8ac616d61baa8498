//! Annotations emitted by the decoder and the sink they are reported to.

use serde::{Deserialize, Serialize};

use crate::transaction::SampleRange;

/// Annotation classes, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationClass {
    #[serde(rename = "fifo")]
    FifoData,
    #[serde(rename = "write")]
    RegWrite,
    #[serde(rename = "read")]
    RegRead,
    #[serde(rename = "tx")]
    Transmission,
    #[serde(rename = "warning")]
    Warning,
}

impl AnnotationClass {
    pub const ALL: [AnnotationClass; 5] = [
        AnnotationClass::FifoData,
        AnnotationClass::RegWrite,
        AnnotationClass::RegRead,
        AnnotationClass::Transmission,
        AnnotationClass::Warning,
    ];

    /// Stable numeric id, matching the display order.
    pub fn id(self) -> usize {
        match self {
            AnnotationClass::FifoData => 0,
            AnnotationClass::RegWrite => 1,
            AnnotationClass::RegRead => 2,
            AnnotationClass::Transmission => 3,
            AnnotationClass::Warning => 4,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            AnnotationClass::FifoData => "fifo",
            AnnotationClass::RegWrite => "write",
            AnnotationClass::RegRead => "read",
            AnnotationClass::Transmission => "tx",
            AnnotationClass::Warning => "warning",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AnnotationClass::FifoData => "Payload",
            AnnotationClass::RegWrite => "Write",
            AnnotationClass::RegRead => "Read",
            AnnotationClass::Transmission => "Transmission",
            AnnotationClass::Warning => "Warning",
        }
    }

    pub fn row(self) -> AnnotationRow {
        match self {
            AnnotationClass::FifoData | AnnotationClass::RegWrite => AnnotationRow::Commands,
            AnnotationClass::Transmission => AnnotationRow::Transmissions,
            AnnotationClass::RegRead => AnnotationRow::Responses,
            AnnotationClass::Warning => AnnotationRow::Warnings,
        }
    }
}

/// Display groupings offered to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationRow {
    Commands,
    Transmissions,
    Responses,
    Warnings,
}

impl AnnotationRow {
    pub const ALL: [AnnotationRow; 4] = [
        AnnotationRow::Commands,
        AnnotationRow::Transmissions,
        AnnotationRow::Responses,
        AnnotationRow::Warnings,
    ];

    pub fn id(self) -> &'static str {
        match self {
            AnnotationRow::Commands => "commands",
            AnnotationRow::Transmissions => "transmissions",
            AnnotationRow::Responses => "responses",
            AnnotationRow::Warnings => "warnings",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AnnotationRow::Commands => "Commands",
            AnnotationRow::Transmissions => "Transmissions",
            AnnotationRow::Responses => "Responses",
            AnnotationRow::Warnings => "Warnings",
        }
    }

    pub fn classes(self) -> Vec<AnnotationClass> {
        AnnotationClass::ALL
            .into_iter()
            .filter(|class| class.row() == self)
            .collect()
    }
}

/// A classified label over a sample range.
///
/// # Examples
/// ```
/// use lt8920_core::{Annotation, AnnotationClass, SampleRange};
///
/// let ann = Annotation::warning(SampleRange::new(0, 8), "Incomplete Transfer", "INC");
/// assert_eq!(ann.class, AnnotationClass::Warning);
/// assert_eq!(ann.short_code.as_deref(), Some("INC"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub start_sample: u64,
    pub end_sample: u64,
    pub class: AnnotationClass,
    pub text: String,
    /// Abbreviated text for narrow displays, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_code: Option<String>,
}

impl Annotation {
    pub fn new(span: SampleRange, class: AnnotationClass, text: impl Into<String>) -> Self {
        Self {
            start_sample: span.start,
            end_sample: span.end,
            class,
            text: text.into(),
            short_code: None,
        }
    }

    pub fn warning(span: SampleRange, text: impl Into<String>, code: &str) -> Self {
        Self {
            short_code: Some(code.to_string()),
            ..Self::new(span, AnnotationClass::Warning, text)
        }
    }

    pub fn span(&self) -> SampleRange {
        SampleRange::new(self.start_sample, self.end_sample)
    }
}

/// Receives annotations in emission order.
pub trait AnnotationSink {
    fn put(&mut self, annotation: Annotation);
}

impl AnnotationSink for Vec<Annotation> {
    fn put(&mut self, annotation: Annotation) {
        self.push(annotation);
    }
}

impl<S: AnnotationSink + ?Sized> AnnotationSink for &mut S {
    fn put(&mut self, annotation: Annotation) {
        (**self).put(annotation);
    }
}
