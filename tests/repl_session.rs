use std::io::Cursor;

use dualindex::{
    config::ReplConfig,
    core::store::DualIndexStore,
    loader,
    repl::{self, Flow, command},
};

fn seeded_store() -> DualIndexStore {
    let dataset = loader::parse_str("key,species,mutation\nAAC,human,none\nAGT,mouse,snp\nTTG,fly,del\n");
    let mut store = DualIndexStore::new();
    store.bulk_load(&dataset.records);
    store
}

fn run_script(store: &mut DualIndexStore, script: &str) -> String {
    let mut out = Vec::new();
    repl::run(store, Cursor::new(script.as_bytes()), &mut out, &ReplConfig::default()).expect("run");
    String::from_utf8(out).expect("utf8")
}

#[test]
fn scripted_session_renders_each_outcome() {
    let mut store = seeded_store();
    let text = run_script(
        &mut store,
        "find AAC\n\
         create GGA yeast ins\n\
         create GGA yeast ins\n\
         read CCC\n\
         update ZZZ a b\n\
         update GGA yeast dup\n\
         delete AGT\n\
         delete AGT\n\
         prefix A\n\
         exit\n\
         read AAC\n",
    );

    assert!(text.contains("HashMap:   ✓ Found \"AAC\""));
    assert!(text.contains("-> human, none"));
    assert!(text.contains("Created \"GGA\" in HashMap("));
    assert!(text.contains("✗ \"GGA\" already exists, create failed"));
    assert!(text.contains("Ordered:   ✗ \"CCC\" not found"));
    assert!(text.contains("Nearest: [GGA] -> yeast, ins"));
    assert!(text.contains("Upper bound: [GGA]"));
    assert!(text.contains("✗ \"ZZZ\" not found, update failed"));
    assert!(text.contains("Updated \"GGA\""));
    assert!(text.contains("Deleted \"AGT\""));
    assert!(text.contains("✗ \"AGT\" not found, delete failed"));
    assert!(text.contains("1 record(s) found"));
    assert!(text.contains("• AAC: human, none"));
    assert!(text.ends_with("Goodbye!\n"));
    // Nothing after `exit` runs.
    assert_eq!(text.matches("Found \"AAC\"").count(), 2);

    assert_eq!(store.len(), 3);
    assert!(store.is_consistent());
}

#[test]
fn bad_input_never_ends_the_session() {
    let mut store = seeded_store();
    let text = run_script(&mut store, "\nfrobnicate\ncreate ACGT\ndelete\nhelp\n");

    assert!(text.contains("unknown command: frobnicate"));
    assert!(text.contains("Usage: create <key> <species> <mutation>"));
    assert!(text.contains("Usage: delete <key>"));
    assert!(text.contains("prefix <prefix>"));
    assert!(text.ends_with("Goodbye!\n"));
    assert_eq!(store.len(), 3);
}

#[test]
fn execute_reports_exit_flow() {
    let mut store = DualIndexStore::new();
    let mut out = Vec::new();
    let cmd = command::parse("exit").expect("parse");
    let flow = repl::execute(&mut store, cmd, &mut out, &ReplConfig::default()).expect("execute");
    assert_eq!(flow, Flow::Exit);
    assert!(out.is_empty());
}

#[test]
fn find_on_empty_store_reports_no_nearest() {
    let mut store = DualIndexStore::new();
    let text = run_script(&mut store, "find ACGT\n");
    assert!(text.contains("HashMap:   ✗ \"ACGT\" not found"));
    assert!(text.contains("Nearest: none (index is empty)"));
    assert!(!text.contains("Lower bound"));
}
