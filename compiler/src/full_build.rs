//! 一括構築モジュール
//!
//! このモジュールは、単語リストから2つの語彙を一括構築する機能を提供します。
//! 分類と変換の2つのステップを自動的に実行します。

use std::path::PathBuf;

use clap::Parser;
use pronlex::errors::PronlexError;
use pronlex::layout::Layout;

use crate::{classify, transduce};

/// 一括構築コマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "full-build",
    about = "Builds the reference and non-reference lexicons from a wordlist"
)]
pub struct Args {
    /// Directory holding wordlist.txt, the override lists and letter_to_sound.txt.
    #[clap(short = 'i', long, value_name = "DIR", default_value = "input")]
    pub input_dir: PathBuf,

    /// Directory to which all artifacts will be output.
    #[clap(short = 'o', long, value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Reference pronunciation dictionary in the CMU format.
    #[clap(short = 'd', long, value_name = "CMUDICT_PATH")]
    pub dict: PathBuf,

    /// Letter-to-sound rule table. Defaults to letter_to_sound.txt in the input directory.
    #[clap(short = 'c', long, value_name = "FILE_PATH")]
    pub config: Option<PathBuf>,
}

/// 一括構築中に発生する可能性のあるエラー
///
/// 分類と変換の各ステップで発生したエラーをラップします。
#[derive(Debug, thiserror::Error)]
pub enum FullBuildError {
    /// pronlexライブラリのエラー
    #[error(transparent)]
    Pronlex(#[from] PronlexError),
}

/// 一括構築コマンドを実行する
///
/// 以下の2つのステップを順次実行します:
/// 1. 単語リストを分類し、既知語の語彙と一時語彙を出力
/// 2. 一時語彙を規則表で変換
///
/// 語数の照合が一致しなくても変換は続けます。
///
/// # エラー
///
/// 各ステップの処理やファイルの入出力に失敗した場合、`FullBuildError`を返します。
pub fn run(args: Args) -> Result<(), FullBuildError> {
    let layout = Layout::new(args.input_dir, args.output_dir);

    println!("[1/2] Classifying the wordlist...");
    let report = classify::classify(&layout, &args.dict)?;
    if !report.reconciliation.is_consistent() {
        log::warn!("Continuing with inconsistent wordlists");
    }

    println!("[2/2] Transcribing non-reference words...");
    let mut paths = layout.transducer_paths();
    if let Some(config) = args.config {
        paths.config = config;
    }
    log::debug!("{paths:?}");
    transduce::transduce(&paths)?;

    println!(
        "Successfully built all lexicons in {}",
        layout.output_dir().display()
    );
    Ok(())
}
