//! 発音語彙コンパイラのメインエントリーポイント
//!
//! このモジュールは、単語リストから発音語彙を構築するためのサブコマンドを提供します。
//! 参照辞書による単語リストの分類、規則表による非参照語の変換、
//! およびその両方を続けて行う一括構築を統合したCLIツールです。

mod classify;
mod full_build;
mod transduce;

use clap::Parser;
use thiserror::Error;

use crate::{classify::ClassifyError, full_build::FullBuildError, transduce::TransduceError};

/// コマンドライン引数の構造体
///
/// `clap`を使用してコマンドライン引数をパースします。
#[derive(Parser, Debug)]
#[clap(name = "compile", version)]
struct Cli {
    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Command,
}

/// 利用可能なサブコマンド
///
/// 各サブコマンドは語彙構築の異なるステージに対応します。
#[derive(Parser, Debug)]
enum Command {
    /// 単語リストから語彙を一括で構築します
    ///
    /// 分類と変換を続けて実行し、既知語の語彙と非参照語の語彙を生成します。
    FullBuild(full_build::Args),

    /// 単語リストを参照辞書で分類します
    ///
    /// 既知語の語彙、変換前の一時語彙、照合用の単語リストを出力します。
    Classify(classify::Args),

    /// 一時語彙を規則表で音素列に変換します
    ///
    /// 変換に成功すると入力の一時語彙は削除されます。
    Transduce(transduce::Args),
}

/// コンパイラの実行中に発生する可能性のあるエラー
///
/// 各サブコマンドで発生したエラーをラップします。
#[derive(Debug, Error)]
pub enum CompileError {
    /// 一括構築中のエラー
    #[error(transparent)]
    FullBuildError(#[from] FullBuildError),
    /// 分類中のエラー
    #[error(transparent)]
    ClassifyError(#[from] ClassifyError),
    /// 変換中のエラー
    #[error(transparent)]
    TransduceError(#[from] TransduceError),
}

/// メイン関数
///
/// コマンドライン引数をパースし、指定されたサブコマンドを実行します。
///
/// # エラー
///
/// 各サブコマンドの実行中にエラーが発生した場合、そのエラーが返されます。
fn main() -> Result<(), CompileError> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::FullBuild(args) => Ok(full_build::run(args)?),
        Command::Classify(args) => Ok(classify::run(args)?),
        Command::Transduce(args) => Ok(transduce::run(args)?),
    }
}
