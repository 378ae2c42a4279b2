#![allow(dead_code)]

use quadbreak::alphabet::Alphabet;
use quadbreak::scorer::{QuadgramModel, Scorer};
use std::sync::{Arc, OnceLock};

pub const CORPUS: &str = include_str!("../data/english.txt");

pub const AFFINE_SAMPLE: &str = "KQEREJEBCPPCJCRKIEACUZBKRVPKRBCIBQCARBJCVFCUPKRIOFKPACUZQEPBKRXPEIIEABDKPBCPFCDCCAFIEABDKPBCPFEQPKAZBKRHAIBKAPCCIBURCCDKDCCJCIDFUIXPAFFERBICZDFKABICBBENEFCUPJCVKABPCYDCCDPKBCOCPERKIVKSCPICBRKIJPKABI";

pub const SUBSTITUTION_SAMPLE: &str = "EMGLOSUDCGDNCUSWYSFHNSFCYKDPUMLWGYICOXYSIPJCK\
QPKUGKMGOLICGINCGACKSNISACYKZSCKXECJCKSHYSXCG\
OIDPKZCNKSHICGIWYGKKGKGOLDSILKGOIUSIGLEDSPWZU\
GFZCCNDGYYSFUSZCNXEOJNCGYEOWEUPXEZGACGNFGLKNS\
ACIGOIYCKXCJUCIUZCFZCCNDGYYSFEUEKUZCSOCFZCCNC\
IACZEJNCSHFZEJZEGMXCYHCJUMGKUCY";

pub const VIGENERE_SAMPLE: &str = "KCCPKBGUFDPHQTYAVINRRTMVGRKDNBVFDETDGILTXRGUDDKOTFMBPVGEGLTGCKQRACQCWDNAWCRXIZAKFTLEWRPTYCQKYVXCHKFTPONCQQRHJVAJUWETMCMSPKQDYHJVDAHCTRLSVSKCGCZQQDZXGSFRLSWCWSJTBHAFSIASPRJAHKJRJUMVGKMITZHFPDISPZLVLGWTFPLKKEBDPGCEBSHCTJRWXBAFSPEZQNRWXCVYCGAONWDDKACKAWBBIKFTIOVKCGGHJVLNHIFFSQESVYCLACNVRWBBIREPBBVFEXOSCDYGZWPFDTKFQIYCWHJVLNHIQIBTKHJVNPIST";

/// English text that does not appear in the training corpus.
pub const HELD_OUT: &str = "Sailors who crossed the northern waters in winter learned to read the colour of the sky and the shape of the waves long before any instrument could warn them of a coming storm.";

/// Dense base-26 table of log10 quadgram probabilities over the bundled
/// corpus; unseen quadgrams get log10(0.01 / total).
pub fn english_table() -> Vec<f64> {
    let alphabet = Alphabet::english();
    let m = alphabet.len();
    let idx = alphabet.encode(CORPUS);

    let mut counts = vec![0u64; m.pow(4)];
    for w in idx.windows(4) {
        let i = ((w[0] as usize * m + w[1] as usize) * m + w[2] as usize) * m + w[3] as usize;
        counts[i] += 1;
    }
    let total: u64 = counts.iter().sum();
    let floor = (0.01 / total as f64).log10();

    counts
        .iter()
        .map(|&c| {
            if c > 0 {
                (c as f64 / total as f64).log10()
            } else {
                floor
            }
        })
        .collect()
}

pub fn english_model() -> QuadgramModel {
    QuadgramModel::from_dense(Alphabet::english(), &english_table()).unwrap()
}

/// Shared across the tests of one binary; building the table is not free.
pub fn english_scorer() -> Arc<Scorer> {
    static SCORER: OnceLock<Arc<Scorer>> = OnceLock::new();
    SCORER
        .get_or_init(|| Arc::new(Scorer::new(english_model())))
        .clone()
}

pub fn letters(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
