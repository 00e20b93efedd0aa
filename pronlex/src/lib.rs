//! # pronlex
//!
//! pronlexは、コーパスから得られた単語リストに対する発音語彙を構築するライブラリです。
//!
//! ## 概要
//!
//! 語彙の構築は、中間ファイルを介した2つの独立したステージで行われます。
//!
//! - **分類**: 単語リストを、人手で用意された上書きリストと参照発音辞書の検索によって
//!   互いに素な分類に分け、既知語の語彙と、発音を生成すべき単語の一時語彙を書き出します。
//!   最後に、単語が失われたり重複したりしていないことを語数の照合で確かめます。
//! - **変換**: 一時語彙の単語を、書記素から音素への規則表を最長一致で適用して音素列に変換します。
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::collections::BTreeSet;
//!
//! use pronlex::{RuleTable, Transducer};
//!
//! let rules = "t T\nth T H\nh H\na A\n";
//! let transducer = Transducer::new(RuleTable::from_reader(rules.as_bytes())?);
//!
//! let mut oov = BTreeSet::new();
//! let t = transducer.transcribe("thab", &mut oov);
//! assert_eq!(t.to_string(), "thab T H A (b)");
//! assert!(oov.contains(&'b'));
//! # Ok(())
//! # }
//! ```

/// 単語の分類
pub mod category;

/// 単語リストの分類と語数の照合
pub mod classifier;

/// 参照発音辞書
pub mod dictionary;

/// エラー型の定義
pub mod errors;

/// 入出力ファイルの配置
pub mod layout;

/// 語彙ファイルの書き出し
pub mod lexicon;

/// 最長一致による文字から音への変換
pub mod transducer;

/// 内部ユーティリティ関数
pub mod utils;


// Re-exports
pub use classifier::{ClassificationResult, Classifier, Overrides, Reconciliation};
pub use dictionary::{CmuDictionary, PronunciationDictionary};
pub use layout::{Layout, TransducerPaths};
pub use transducer::{RuleTable, SoundRule, Transducer};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
