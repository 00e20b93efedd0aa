//! 文字から音への変換を実行するユーティリティ
//!
//! このバイナリは、標準入力から読み込んだ単語を規則表で音素列に変換し、
//! 指定された出力形式（plain、detail）で結果を出力します。

use std::collections::BTreeSet;
use std::error::Error;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use pronlex::{RuleTable, Transducer};

use clap::Parser;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Plain,
    Detail,
}

/// `OutputMode` の `FromStr` 実装
impl FromStr for OutputMode {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "plain" => Ok(Self::Plain),
            "detail" => Ok(Self::Detail),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "transcribe", about = "Predicts pronunciations of words")]
struct Args {
    /// Letter-to-sound rule table.
    #[clap(short = 'c', long)]
    config: PathBuf,

    /// Output mode. Choices are plain and detail.
    #[clap(short = 'O', long, default_value = "plain")]
    output_mode: OutputMode,
}

/// メイン関数
///
/// 規則表をロードし、標準入力の各行の単語を変換して標準出力に出力します。
/// 空白で区切られた複数の単語を含む行は、単語ごとに変換されます。
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the rule table...");
    let table = RuleTable::from_path(args.config)?;
    let transducer = Transducer::new(table);

    eprintln!("Ready to transcribe");

    let is_tty = atty::is(atty::Stream::Stdout);

    let mut oov = BTreeSet::new();
    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        for word in line.split_whitespace() {
            let t = transducer.transcribe(word, &mut oov);
            match args.output_mode {
                OutputMode::Plain => {
                    writeln!(&mut out, "{t}")?;
                }
                OutputMode::Detail => {
                    for unit in t.units() {
                        writeln!(
                            &mut out,
                            "{}\t{}\toov={}",
                            unit.source(),
                            unit.output(),
                            unit.is_oov()
                        )?;
                    }
                    out.write_all(b"EOS\n")?;
                }
            }
        }
        if is_tty {
            out.flush()?;
        }
    }
    out.flush()?;

    if !oov.is_empty() {
        let chars: String = oov.iter().collect();
        eprintln!("Unexpected characters: {chars}");
    }

    Ok(())
}
