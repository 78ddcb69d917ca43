use keyform_types::Converter;

use crate::annotation::AnnotationKind;
use crate::decl::FieldDecl;
use crate::error::SchemaResult;

// ---------------------------------------------------------------------------
// RuleContext
// ---------------------------------------------------------------------------

/// Everything a rule sees about the model under classification.
pub struct RuleContext<'a> {
    /// Name of the model being classified.
    pub model: &'static str,
    /// Every declared field, inherited fields first.
    pub fields: &'a [FieldDecl],
    /// Decides which declared type names are supported scalars.
    pub converter: &'a dyn Converter,
}

impl RuleContext<'_> {
    /// Fields carrying the given annotation.
    pub fn annotated(&self, kind: AnnotationKind) -> impl Iterator<Item = &FieldDecl> + '_ {
        self.fields.iter().filter(move |f| f.has(kind))
    }
}

// ---------------------------------------------------------------------------
// SchemaRule trait
// ---------------------------------------------------------------------------

/// A single validation rule in the classification pipeline.
///
/// Rules run in order over the whole field list; the first rule that
/// returns an error stops classification. The trait is object-safe and
/// `Send + Sync` so rules can live in a `Vec<Box<dyn SchemaRule>>`.
pub trait SchemaRule: Send + Sync {
    /// Short name used in logs (e.g. "identity", "collection").
    fn name(&self) -> &str;

    fn check(&self, context: &RuleContext<'_>) -> SchemaResult<()>;
}
