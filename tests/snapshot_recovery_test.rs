use std::fs;

use tempfile::TempDir;
use wordbank::config::WordBankConfig;
use wordbank::error::Result;
use wordbank::index::Order;
use wordbank::shared::SharedWordBank;
use wordbank::snapshot::{Snapshot, load_bank, save_bank};
use wordbank::store::WordBank;

fn populated_bank() -> Result<WordBank> {
    let mut bank = WordBank::new();
    bank.add_word_with_tags("serendipity", "a happy accident", ["noun", "favourite"])?;
    bank.add_word_with_tags("ephemeral", "lasting a short time", ["adjective"])?;
    bank.add_word("laconic", "using few words")?;
    bank.add_example("laconic", "His laconic reply ended the debate.")?;
    bank.add_synonyms("ephemeral", ["fleeting", "transient"])?;
    for _ in 0..5 {
        bank.increase_search_count("serendipity")?;
    }
    Ok(bank)
}

#[test]
fn test_snapshot_survives_restart() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("bank.json");

    {
        let bank = populated_bank()?;
        save_bank(&bank, &path)?;
    }

    {
        let (bank, report) = load_bank(&path, WordBankConfig::default())?;
        assert!(report.skipped.is_empty(), "unexpected skips: {:?}", report.skipped);

        assert_eq!(bank.len(), 3);
        assert_eq!(bank.get("serendipity").map(|e| e.search_count()), Some(6));
        assert_eq!(
            bank.search_example("laconic")?,
            Some("His laconic reply ended the debate.")
        );
        assert!(bank.synonyms_for_word("ephemeral")?.contains("fleeting"));
        assert_eq!(
            bank.list_by_frequency(Order::Descending)[0],
            (6, vec!["serendipity".to_string()])
        );
        bank.verify_integrity()?;
    }
    Ok(())
}

#[test]
fn test_save_overwrites_previous_snapshot() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("bank.json");

    let mut bank = populated_bank()?;
    save_bank(&bank, &path)?;
    bank.delete_word("laconic")?;
    save_bank(&bank, &path)?;

    let (restored, _) = load_bank(&path, WordBankConfig::default())?;
    assert!(!restored.contains("laconic"));
    assert_eq!(restored.len(), 2);

    // only the snapshot itself remains, no stray temporary files
    let files: Vec<_> = fs::read_dir(dir.path())?.collect();
    assert_eq!(files.len(), 1);
    Ok(())
}

#[test]
fn test_snapshot_json_is_readable() -> Result<()> {
    let bank = populated_bank()?;
    let snapshot = Snapshot::capture(&bank);
    let json = serde_json::to_value(&snapshot)?;

    let words = json["words"].as_array().map(Vec::len);
    assert_eq!(words, Some(3));
    assert_eq!(json["words"][0]["word"], "serendipity");
    assert_eq!(json["words"][0]["search_count"], 6);
    Ok(())
}

#[test]
fn test_shared_bank_round_trip() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("bank.json");

    let shared = SharedWordBank::new(populated_bank()?);
    shared.with(|bank| bank.add_word("quixotic", "unrealistically idealistic"))?;
    shared.with(|bank| save_bank(bank, &path))?;

    let (restored, _) = load_bank(&path, WordBankConfig::default())?;
    assert!(restored.contains("quixotic"));
    Ok(())
}
