use super::model::{ModelInfo, QuadgramModel};
use crate::alphabet::Alphabet;
use crate::consts::{NORMALIZATION, QUADGRAM_LEN};
use crate::error::QbResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// On-disk form of a quadgram table.
///
/// `quadgrams` with exactly `|alphabet|^4` entries is read as the dense
/// base-`m` layout; any other length is read as an already packed table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuadgramRecord {
    pub alphabet: String,
    pub quadgrams: Vec<f64>,
    #[serde(default)]
    pub nbr_quadgrams: Option<u64>,
    #[serde(default)]
    pub most_frequent_quadgram: Option<String>,
    /// Raw (not yet normalized) average.
    #[serde(default)]
    pub average_fitness: Option<f64>,
    /// Raw (not yet normalized) maximum.
    #[serde(default)]
    pub max_fitness: Option<f64>,
}

impl QuadgramRecord {
    pub fn from_reader<R: Read>(reader: R) -> QbResult<Self> {
        let record: QuadgramRecord = serde_json::from_reader(reader)?;
        Ok(record)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> QbResult<Self> {
        let path = path.as_ref();
        info!("📂 Loading quadgram table from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn into_model(self) -> QbResult<QuadgramModel> {
        let alphabet = Alphabet::new(&self.alphabet)?;
        let dense_len = alphabet.len().pow(QUADGRAM_LEN as u32);

        let model = if self.quadgrams.len() == dense_len {
            QuadgramModel::from_dense(alphabet, &self.quadgrams)?
        } else {
            debug!(
                "Table has {} entries (dense would be {}), reading as packed",
                self.quadgrams.len(),
                dense_len
            );
            QuadgramModel::from_packed(alphabet, self.quadgrams)?
        };

        // Stored statistics win over recomputed ones, field by field.
        let computed = model.info().clone();
        let info = ModelInfo {
            nbr_quadgrams: self.nbr_quadgrams.unwrap_or(computed.nbr_quadgrams),
            most_frequent_quadgram: self
                .most_frequent_quadgram
                .unwrap_or(computed.most_frequent_quadgram),
            average_fitness: self
                .average_fitness
                .map(|v| v / NORMALIZATION)
                .unwrap_or(computed.average_fitness),
            max_fitness: self
                .max_fitness
                .map(|v| v / NORMALIZATION)
                .unwrap_or(computed.max_fitness),
        };
        Ok(model.with_info(info))
    }
}

pub fn load_model<P: AsRef<Path>>(path: P) -> QbResult<QuadgramModel> {
    QuadgramRecord::load_from_file(path)?.into_model()
}
