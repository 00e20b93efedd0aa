use std::collections::BTreeSet;
use std::fs;

use hashbrown::HashMap;
use tempfile::{tempdir, TempDir};

use crate::classifier::{self, Classifier, OutputCounts, Overrides, Reconciliation};
use crate::dictionary::Pronunciation;
use crate::errors::PronlexError;
use crate::layout::{self, Layout};
use crate::utils::{self, hashmap};

fn pron(phonemes: &str) -> Pronunciation {
    phonemes.split(' ').map(str::to_string).collect()
}

fn animal_dict() -> HashMap<String, Vec<Pronunciation>> {
    hashmap! {
        "cat".to_string() => vec![pron("K AE1 T")],
        "dog".to_string() => vec![pron("D AO1 G")],
        "bird".to_string() => vec![pron("B ER1 D")],
        "fish".to_string() => vec![pron("F IH1 SH")],
    }
}

struct TestEnv {
    _dir: TempDir,
    layout: Layout,
}

impl TestEnv {
    fn new(wordlist: &str) -> Self {
        let dir = tempdir().unwrap();
        let layout = Layout::new(dir.path().join("input"), dir.path().join("output"));
        fs::create_dir_all(layout.input_dir()).unwrap();
        fs::write(layout.input(layout::WORDLIST), wordlist).unwrap();
        Self { _dir: dir, layout }
    }

    fn write_input(&self, name: &str, content: &str) {
        fs::write(self.layout.input(name), content).unwrap();
    }

    fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.layout.output(name)).unwrap()
    }

    fn output_entries(&self, name: &str) -> Vec<String> {
        utils::read_nonblank_lines(fs::File::open(self.layout.output(name)).unwrap()).unwrap()
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

#[test]
fn test_known_and_unresolved_words() {
    let env = TestEnv::new("cat\ndog\nxyzzy\n");
    let report = classifier::run(&env.layout, &animal_dict()).unwrap();

    assert_eq!(
        env.read_output(layout::LEXICON_EN),
        "\n# missed.txt - supplied words missed by CMU, do these manually \n\n\
         \n# CMU ENG words found \n\ncat K AE T\ndog D AO G\n"
    );
    assert_eq!(env.output_entries(layout::WORDS_NON_ENG), vec!["xyzzy"]);
    assert_eq!(env.output_entries(layout::LEXICON_NON_ENG_TMP), vec!["xyzzy"]);
    assert!(report.reconciliation.is_consistent());
    assert_eq!(report.counts.wordlist, 3);
    assert_eq!(report.counts.known_words, 2);
    assert_eq!(report.absent.len(), 5);
}

#[test]
fn test_partition_is_complete_and_disjoint() {
    let wordlist = words(&["cat", "dog", "bird", "fish", "kuku", "Cat", "moana", "NASA", "tapu"]);
    let cases = [
        Overrides::default(),
        Overrides {
            ambiguous: words(&["cat"]),
            ..Overrides::default()
        },
        Overrides {
            ambiguous: words(&["moana"]),
            excluded: words(&["dog", "Cat"]),
            manual: words(&["NASA"]),
            missed: words(&["tapu", "bird"]),
            ..Overrides::default()
        },
        Overrides {
            excluded: words(&["fish", "fish", "kuku"]),
            missed: words(&["NASA"]),
            missed_map: Some(words(&["NASA N AE S AH"])),
            manual_map_supplied: true,
            ..Overrides::default()
        },
    ];

    for overrides in cases {
        let result = Classifier::new(animal_dict()).classify(wordlist.iter().cloned(), overrides);
        let known_blocks = result.known_wordlist();
        let non_reference_blocks = result.non_reference_wordlist();
        let known: Vec<&str> = known_blocks
            .iter()
            .flat_map(|b| b.entries())
            .map(String::as_str)
            .collect();
        let non_reference: Vec<&str> = non_reference_blocks
            .iter()
            .flat_map(|b| b.entries())
            .map(String::as_str)
            .collect();

        let known_set: BTreeSet<&str> = known.iter().copied().collect();
        let non_reference_set: BTreeSet<&str> = non_reference.iter().copied().collect();
        assert!(known_set.is_disjoint(&non_reference_set));

        let union: BTreeSet<String> = known_set
            .union(&non_reference_set)
            .map(|w| w.to_string())
            .collect();
        assert_eq!(&union, result.input());

        let rec = Reconciliation::compute(result.input(), &known, &non_reference);
        assert!(rec.is_consistent());
    }
}

#[test]
fn test_reference_lookup_ignores_case_but_keeps_spelling() {
    let env = TestEnv::new("Cat\ncat\n");
    classifier::run(&env.layout, &animal_dict()).unwrap();
    assert_eq!(
        env.output_entries(layout::LEXICON_EN),
        vec!["Cat K AE T", "cat K AE T"]
    );
}

#[test]
fn test_rerun_is_idempotent() {
    let env = TestEnv::new("cat\ndog\nkuku\nmoana\nNASA\n");
    env.write_input(layout::AMBIGUOUS, "moana\n");
    env.write_input(layout::MANUAL, "NASA\n");
    env.write_input(layout::MISSED, "kuku\n");

    let outputs = [
        layout::LEXICON_EN,
        layout::LEXICON_NON_ENG_TMP,
        layout::WORDS_EN,
        layout::WORDS_NON_ENG,
    ];

    classifier::run(&env.layout, &animal_dict()).unwrap();
    let first: Vec<Vec<u8>> = outputs
        .iter()
        .map(|name| fs::read(env.layout.output(name)).unwrap())
        .collect();

    classifier::run(&env.layout, &animal_dict()).unwrap();
    let second: Vec<Vec<u8>> = outputs
        .iter()
        .map(|name| fs::read(env.layout.output(name)).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_missing_count_is_diagnosed() {
    let env = TestEnv::new("a\nb\nc\nd\ne\nf\ng\nh\ni\nj\n");
    let report = classifier::run(&env.layout, &animal_dict()).unwrap();
    assert!(report.reconciliation.is_consistent());

    // Drop one word from the generated wordlist by hand.
    let path = env.layout.output(layout::WORDS_NON_ENG);
    let edited = env.read_output(layout::WORDS_NON_ENG).replace("e\n", "");
    fs::write(&path, edited).unwrap();

    let input: BTreeSet<String> = classifier::read_wordlist(&env.layout)
        .unwrap()
        .into_iter()
        .collect();
    let rec = Reconciliation::from_outputs(&env.layout, &input).unwrap();
    assert_eq!(rec.input_count, 10);
    assert_eq!(rec.generated_count(), 9);
    assert_eq!(rec.difference(), -1);
    assert_eq!(rec.missing, vec!["e"]);
    assert!(rec.duplicates.is_empty());
    assert!(rec.invented.is_empty());
}

#[test]
fn test_override_outside_wordlist_is_reported_as_invented() {
    let env = TestEnv::new("cat\n");
    env.write_input(layout::EXCLUDE, "tapu\n");
    let report = classifier::run(&env.layout, &animal_dict()).unwrap();
    assert_eq!(report.reconciliation.difference(), 1);
    assert_eq!(report.reconciliation.invented, vec!["tapu"]);
    assert!(report.reconciliation.missing.is_empty());
}

#[test]
fn test_word_in_two_overrides_is_reported_as_duplicate() {
    let env = TestEnv::new("moana\n");
    env.write_input(layout::AMBIGUOUS, "moana\n");
    env.write_input(layout::MISSED, "moana\n");
    let report = classifier::run(&env.layout, &animal_dict()).unwrap();
    assert_eq!(report.reconciliation.difference(), 1);
    assert_eq!(report.reconciliation.duplicates, vec!["moana"]);
}

#[test]
fn test_missed_map_goes_to_known_lexicon() {
    let env = TestEnv::new("cat\nkuku\n");
    env.write_input(layout::MISSED, "kuku\n");
    env.write_input(layout::MISSED_MAP, "kuku K UW K UW\n");
    let report = classifier::run(&env.layout, &animal_dict()).unwrap();

    assert!(report.missed_map_supplied);
    assert_eq!(
        env.output_entries(layout::LEXICON_EN),
        vec!["kuku K UW K UW", "cat K AE T"]
    );
    assert!(env
        .read_output(layout::LEXICON_EN)
        .contains("# missed_map.txt - supplied map of words missed by CMU \n"));
    assert_eq!(env.output_entries(layout::WORDS_EN), vec!["kuku", "cat"]);
}

#[test]
fn test_missed_map_without_missed_list_is_ignored() {
    let env = TestEnv::new("cat\n");
    env.write_input(layout::MISSED_MAP, "cat K AE T\n");
    let report = classifier::run(&env.layout, &animal_dict()).unwrap();

    assert!(!report.missed_map_supplied);
    assert_eq!(env.output_entries(layout::LEXICON_EN), vec!["cat K AE T"]);
    assert!(!env
        .read_output(layout::LEXICON_EN)
        .contains(layout::MISSED_MAP));
    assert_eq!(env.output_entries(layout::WORDS_EN), vec!["cat"]);
    assert!(report.reconciliation.is_consistent());
}

#[test]
fn test_manual_map_defers_manual_block() {
    let env = TestEnv::new("NASA\nkuku\n");
    env.write_input(layout::MANUAL, "NASA\n");
    env.write_input(layout::MANUAL_MAP, "NASA N AE S AH\n");
    let report = classifier::run(&env.layout, &animal_dict()).unwrap();

    assert!(report.manual_map_supplied);
    assert_eq!(env.output_entries(layout::LEXICON_NON_ENG_TMP), vec!["kuku"]);
    assert_eq!(env.output_entries(layout::WORDS_NON_ENG), vec!["NASA", "kuku"]);
    assert_eq!(report.counts.non_reference_lexicon, 1);
    assert_eq!(report.counts.non_reference_words, 2);
    assert!(report.reconciliation.is_consistent());
}

#[test]
fn test_duplicated_input_lines() {
    let env = TestEnv::new("# corpus words\n\ncat\ncat\n\ndog\n");
    let report = classifier::run(&env.layout, &animal_dict()).unwrap();
    assert_eq!(report.counts.wordlist, 3);
    assert_eq!(report.reconciliation.input_count, 2);
    assert!(report.reconciliation.is_consistent());
}

#[test]
fn test_stale_outputs_are_purged() {
    let env = TestEnv::new("cat\n");
    fs::create_dir_all(env.layout.output_dir()).unwrap();
    let stale = env.layout.output(layout::LEXICON_NON_ENG);
    fs::write(&stale, "old").unwrap();
    classifier::run(&env.layout, &animal_dict()).unwrap();
    assert!(!stale.exists());
}

#[test]
fn test_missing_wordlist_is_fatal() {
    let dir = tempdir().unwrap();
    let layout = Layout::new(dir.path().join("input"), dir.path().join("output"));
    match classifier::run(&layout, &animal_dict()) {
        Err(PronlexError::FileNotFound(path)) => {
            assert_eq!(path, layout.input(layout::WORDLIST));
        }
        other => panic!("unexpected result: {:?}", other.map(|r| r.counts)),
    }
}

#[test]
fn test_output_counts() {
    let env = TestEnv::new("cat\nkuku\n");
    classifier::run(&env.layout, &animal_dict()).unwrap();
    let counts = OutputCounts::from_layout(&env.layout).unwrap();
    assert_eq!(
        counts,
        OutputCounts {
            wordlist: 2,
            known_lexicon: 1,
            non_reference_lexicon: 1,
            known_words: 1,
            non_reference_words: 1,
        }
    );
}
