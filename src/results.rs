use crate::error::{QbResult, QuadbreakError};

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<K> {
    pub fitness: f64,
    pub plaintext: String,
    pub key: K,
}

/// Bounded top-K collection, sorted by fitness descending, with no two
/// entries sharing a plaintext.
#[derive(Debug, Clone)]
pub struct ResultSet<K> {
    top_k: usize,
    entries: Vec<ScoredCandidate<K>>,
}

impl<K> ResultSet<K> {
    pub fn new(top_k: usize) -> QbResult<Self> {
        if top_k == 0 {
            return Err(QuadbreakError::Config(
                "top_k must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            top_k,
            entries: Vec::with_capacity(top_k + 1),
        })
    }

    /// Inserts the observation if it makes the cut. Returns whether it was kept.
    ///
    /// NaN fitness and plaintexts already present are dropped.
    pub fn offer(&mut self, fitness: f64, plaintext: String, key: K) -> bool {
        self.offer_candidate(ScoredCandidate {
            fitness,
            plaintext,
            key,
        })
    }

    /// Whether a candidate with `fitness` would make the cut, ignoring
    /// deduplication. Lets callers skip building a plaintext.
    pub fn admits(&self, fitness: f64) -> bool {
        if fitness.is_nan() {
            return false;
        }
        match self.entries.last() {
            Some(last) if self.entries.len() >= self.top_k => fitness > last.fitness,
            _ => true,
        }
    }

    pub fn offer_candidate(&mut self, candidate: ScoredCandidate<K>) -> bool {
        if !self.admits(candidate.fitness) {
            return false;
        }
        if self
            .entries
            .iter()
            .any(|e| e.plaintext == candidate.plaintext)
        {
            return false;
        }

        let pos = self
            .entries
            .iter()
            .position(|e| candidate.fitness > e.fitness)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, candidate);
        self.entries.truncate(self.top_k);
        true
    }

    /// Offers every entry of `other`.
    pub fn merge(&mut self, other: ResultSet<K>) {
        for candidate in other.entries {
            self.offer_candidate(candidate);
        }
    }

    pub fn best(&self) -> Option<&ScoredCandidate<K>> {
        self.entries.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredCandidate<K>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn into_vec(self) -> Vec<ScoredCandidate<K>> {
        self.entries
    }

    pub fn map_keys<J, F>(self, mut f: F) -> ResultSet<J>
    where
        F: FnMut(K) -> J,
    {
        ResultSet {
            top_k: self.top_k,
            entries: self
                .entries
                .into_iter()
                .map(|c| ScoredCandidate {
                    fitness: c.fitness,
                    plaintext: c.plaintext,
                    key: f(c.key),
                })
                .collect(),
        }
    }
}

impl<'a, K> IntoIterator for &'a ResultSet<K> {
    type Item = &'a ScoredCandidate<K>;
    type IntoIter = std::slice::Iter<'a, ScoredCandidate<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
