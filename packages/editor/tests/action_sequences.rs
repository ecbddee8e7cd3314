//! Invariants over many action sequences
//!
//! This tests:
//! - Add/copy/delete/order effects on length and selection
//! - Order round trips
//! - Selection validity after arbitrary sequences
//! - Error boundary key bookkeeping

use pagekit_editor::{reduce, Action, EditorState, ViewMode};
use pagekit_model::{Block, IdGenerator, PageContent};
use std::collections::HashSet;

fn text(name: &str) -> Block {
    Block::new("content-layout-block").with_field("title", name)
}

fn state(len: usize) -> EditorState {
    let blocks = (0..len).map(|i| text(&format!("B{}", i))).collect();
    EditorState::new(PageContent::new(blocks), IdGenerator::new("seq"))
}

fn assert_valid(state: &EditorState) {
    if let Some(active) = state.active_block_index {
        assert!(active < state.content.len(), "active {} out of range", active);
    }
    let ids: HashSet<_> = state.blocks().iter().map(|b| b.id().cloned()).collect();
    assert_eq!(ids.len(), state.content.len(), "block ids must be unique");
    assert!(state.blocks().iter().all(|b| b.id().is_some()));
}

#[test]
fn test_add_grows_by_one_and_selects_index() {
    for len in 0..5 {
        for index in 0..=len {
            let after = reduce(state(len), Action::AddBlock { block: text("new"), index });

            assert_eq!(after.content.len(), len + 1);
            assert_eq!(after.active_block_index, Some(index));
            assert_eq!(after.blocks()[index].str_field("title"), Some("new"));
            assert_valid(&after);
        }
    }
}

#[test]
fn test_delete_then_add_restores_length() {
    for len in 1..5 {
        for index in 0..len {
            let original = state(len);
            let removed = original.blocks()[index].clone();

            let deleted = reduce(original.clone(), Action::DeleteBlock(index));
            assert_eq!(deleted.content.len(), len - 1);
            assert_valid(&deleted);

            let restored = reduce(deleted, Action::AddBlock { block: removed, index });
            assert_eq!(restored.content.len(), len);
            assert_valid(&restored);
        }
    }
}

#[test]
fn test_copy_inserts_twin_after_source() {
    for len in 1..5 {
        for index in 0..len {
            let before = state(len);
            let after = reduce(before.clone(), Action::CopyBlock(index));

            assert_eq!(after.content.len(), len + 1);
            assert!(after.blocks()[index + 1].same_content(&before.blocks()[index]));
            assert_ne!(after.blocks()[index + 1].id(), before.blocks()[index].id());
            assert_eq!(after.active_block_index, Some(index + 1));
            assert_valid(&after);
        }
    }
}

#[test]
fn test_order_round_trip_restores_sequence() {
    let len = 5;
    for old_index in 0..len {
        for new_index in 0..len {
            if old_index == new_index {
                continue;
            }
            for active in [None, Some(0), Some(2), Some(4)] {
                let original = reduce(state(len), Action::SelectBlock(active));
                let there = reduce(original.clone(), Action::OrderBlock { old_index, new_index });
                assert_valid(&there);

                let back = reduce(there, Action::OrderBlock { old_index: new_index, new_index: old_index });
                assert_eq!(back.content, original.content);
                assert_eq!(back.active_block_index, original.active_block_index);
            }
        }
    }
}

#[test]
fn test_order_keeps_selection_on_same_block() {
    let len = 4;
    for old_index in 0..len {
        for new_index in 0..len {
            for active in 0..len {
                let before = reduce(state(len), Action::SelectBlock(Some(active)));
                let selected = before.blocks()[active].id().cloned();

                let after = reduce(before, Action::OrderBlock { old_index, new_index });
                let now = after.active_block_index.unwrap();
                assert_eq!(after.blocks()[now].id().cloned(), selected);
            }
        }
    }
}

#[test]
fn test_selection_stays_valid_through_long_sequence() {
    // Deterministic pseudo-random walk over all actions
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = |bound: usize| {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed % (bound as u64 + 1)) as usize
    };

    let mut current = state(3);
    for step in 0..500 {
        let len = current.content.len();
        let action = match next(6) {
            0 => Action::AddBlock { block: text(&format!("S{}", step)), index: next(len) },
            1 => Action::DeleteBlock(next(len)),
            2 => Action::CopyBlock(next(len)),
            3 => Action::OrderBlock { old_index: next(len), new_index: next(len) },
            4 => Action::SelectBlock(if next(3) == 0 { None } else { Some(next(len)) }),
            5 => Action::UpdateViewMode(if next(1) == 0 { ViewMode::Editing } else { ViewMode::Preview }),
            _ => Action::UpdateContent(PageContent::new(current.blocks()[..len / 2].to_vec())),
        };

        let structural = action.is_structural();
        let before = current.error_boundary_state;
        let content_before = current.content.clone();

        current = reduce(current, action);
        assert_valid(&current);

        if !structural {
            assert_eq!(current.error_boundary_state, before);
            assert_eq!(current.content, content_before);
        } else {
            assert!(current.error_boundary_state == before || current.error_boundary_state == before + 1);
        }
    }
}
