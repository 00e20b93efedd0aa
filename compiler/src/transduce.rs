//! 変換モジュール
//!
//! 分類ステージが出力した一時語彙の単語を、文字から音への規則表で音素列に変換します。

use std::path::PathBuf;

use clap::Parser;
use pronlex::errors::PronlexError;
use pronlex::layout::TransducerPaths;
use pronlex::transducer::{self, TransduceReport};

/// 変換コマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "transduce",
    about = "Transcribes non-reference words with letter-to-sound rules"
)]
pub struct Args {
    /// Word list to be transcribed, one token per line. Removed on success.
    #[clap(short = 'w', long, default_value = "output/lexicon_non_eng_tmp.txt")]
    pub words: PathBuf,

    /// Letter-to-sound rule table.
    #[clap(short = 'c', long, default_value = "input/letter_to_sound.txt")]
    pub config: PathBuf,

    /// Lexicon file to be output.
    #[clap(short = 'o', long, default_value = "output/lexicon_non_eng.txt")]
    pub output_file: PathBuf,

    /// Manual map prepended to the output when it exists.
    #[clap(short = 'm', long, default_value = "input/manual_map.txt")]
    pub manual_map: PathBuf,
}

/// 変換処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum TransduceError {
    /// pronlexライブラリのエラー
    #[error(transparent)]
    Pronlex(#[from] PronlexError),
}

/// 変換コマンドを実行する
///
/// # エラー
///
/// 単語リストや規則表が存在しない場合、またはファイルの入出力に失敗した場合に
/// `TransduceError`を返します。
pub fn run(args: Args) -> Result<(), TransduceError> {
    let paths = TransducerPaths {
        words: args.words,
        config: args.config,
        output_file: args.output_file,
        manual_map: args.manual_map,
    };
    transduce(&paths)?;
    println!("Done. You now need to add SIL and UNK.");
    Ok(())
}

/// 変換ステージを実行し、結果を表示する
pub fn transduce(paths: &TransducerPaths) -> Result<TransduceReport, PronlexError> {
    println!("Generating lexicon from {}...", paths.words.display());
    let report = transducer::run(paths)?;

    println!("{} rules, {} words transcribed", report.num_rules, report.num_transcribed);
    if report.manual_map_supplied {
        println!("Using supplied manual map");
    } else {
        println!("No manual map supplied, make sure you check the output");
    }
    if !report.oov.is_empty() {
        let chars: Vec<String> = report.oov.iter().map(char::to_string).collect();
        println!("Unexpected characters: {}", chars.join(" "));
    }
    println!("{} words in the non-ENG lexicon", report.lexicon_count);
    Ok(report)
}
