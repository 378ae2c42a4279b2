use crate::alphabet::Alphabet;
use crate::error::QbResult;
use crate::scorer::loader::QuadgramRecord;
use crate::scorer::model::{ModelInfo, QuadgramModel};
use crate::scorer::Scorer;
use std::path::Path;
use tracing::debug;
use typed_builder::TypedBuilder;

/// Table layout handed to [`ScorerBuildParams`].
#[derive(Debug, Clone)]
pub enum TableLayout {
    /// `m^4` entries in base-`m` order.
    Dense(Vec<f64>),
    /// Bit-packed rolling-window order, possibly truncated.
    Packed(Vec<f64>),
}

#[derive(TypedBuilder)]
pub struct ScorerBuildParams {
    #[builder(default)]
    pub alphabet: Alphabet,
    pub table: TableLayout,
    #[builder(default, setter(strip_option))]
    pub info: Option<ModelInfo>,
}

impl ScorerBuildParams {
    pub fn load_from_disk<P: AsRef<Path>>(path: P) -> QbResult<Scorer> {
        let model = QuadgramRecord::load_from_file(path)?.into_model()?;
        Ok(Scorer::new(model))
    }

    pub fn build_scorer(self) -> QbResult<Scorer> {
        let model = match self.table {
            TableLayout::Dense(values) => QuadgramModel::from_dense(self.alphabet, &values)?,
            TableLayout::Packed(values) => QuadgramModel::from_packed(self.alphabet, values)?,
        };
        let model = match self.info {
            Some(info) => model.with_info(info),
            None => model,
        };
        debug!(
            "Scorer ready: alphabet={} bits={} slots={}",
            model.alphabet(),
            model.bits(),
            model.table_len()
        );
        Ok(Scorer::new(model))
    }
}
