//! End-to-end pipeline tests: records → aggregation tree → treemap tiling.
//!
//! These tests drive both engines with one realistic media-library record
//! set (the shape the directory scanner produces) and check the global
//! properties the frontend relies on: size conservation, sort order,
//! percentage bounds, tiling coverage, and the `path` join key that ties
//! tree nodes, rectangles, and records together.
//!
//! Unit tests beside the implementations cover the algorithmic edge cases;
//! this file covers the seams between the modules and the JSON boundary the
//! desktop shell feeds records through.

use kuroroku_core::layout::{tile, TileRect};
use kuroroku_core::model::{FileKind, FileRecord, FileTree, NodeIndex, NodeKind};

// ── Helpers ──────────────────────────────────────────────────────────────────

/// A small but realistic library: mixed separators, nested folders, a
/// bare root-level file, and a zero-byte placeholder.
fn library_records() -> Vec<FileRecord> {
    vec![
        FileRecord::new("Videos/Cooking/knife-skills.mp4", 1_400_000_000),
        FileRecord::new("Videos/Cooking/stock-reduction.mp4", 800_000_000),
        FileRecord::new(r"Videos\Travel\kyoto-day1.mkv", 2_100_000_000),
        FileRecord::new("Videos/Travel/kyoto-day2.mkv", 1_900_000_000),
        FileRecord::new("Photos/2024/beach.jpg", 8_000_000),
        FileRecord::new("Photos/2024/sunset.jpg", 6_500_000),
        FileRecord::new("Audio/podcast-archive.flac", 400_000_000),
        FileRecord::new("inbox-unsorted.mp4", 95_000_000),
        FileRecord::new("Photos/empty-placeholder.jpg", 0),
    ]
}

fn walk(tree: &FileTree) -> Vec<NodeIndex> {
    let mut out = Vec::new();
    let mut stack = vec![tree.root];
    while let Some(idx) = stack.pop() {
        out.push(idx);
        stack.extend(tree.children(idx).iter().copied());
    }
    out
}

// ── Tree properties ──────────────────────────────────────────────────────────

#[test]
fn tree_conserves_total_size() {
    let records = library_records();
    let expected: u64 = records.iter().map(|r| r.size).sum();

    let tree = FileTree::build(&records);
    assert_eq!(tree.total_size, expected);
    assert_eq!(tree.node(tree.root).size, expected);
    assert_eq!(tree.node(tree.root).file_count, records.len() as u64);
}

#[test]
fn tree_merges_mixed_separator_folders() {
    let tree = FileTree::build(&library_records());

    // Exactly one Travel folder despite `/` and `\` spellings.
    let travel: Vec<NodeIndex> = walk(&tree)
        .into_iter()
        .filter(|&idx| tree.node(idx).is_folder() && tree.node(idx).name == "Travel")
        .collect();
    assert_eq!(travel.len(), 1);
    assert_eq!(tree.node(travel[0]).size, 4_000_000_000);
}

#[test]
fn tree_children_sorted_and_percentages_bounded() {
    let tree = FileTree::build(&library_records());

    for idx in walk(&tree) {
        let node = tree.node(idx);
        assert!(node.percent_of_parent >= 0.0 && node.percent_of_parent <= 100.0);

        let sizes: Vec<u64> = node
            .children
            .iter()
            .map(|&c| tree.node(c).size)
            .collect();
        assert!(
            sizes.windows(2).all(|w| w[0] >= w[1]),
            "children of {} not sorted descending",
            node.id
        );

        if node.is_folder() {
            let child_sum: u64 = sizes.iter().sum();
            if !node.children.is_empty() {
                assert_eq!(child_sum, node.size, "folder {} size mismatch", node.id);
            }
        }
    }
}

#[test]
fn tree_leaf_ids_join_back_to_records() {
    let records = library_records();
    let tree = FileTree::build(&records);

    let leaf_ids: Vec<&str> = walk(&tree)
        .iter()
        .filter(|&&idx| tree.node(idx).kind == NodeKind::File)
        .map(|&idx| tree.node(idx).id.as_str())
        .collect();

    assert_eq!(leaf_ids.len(), records.len());
    for record in &records {
        assert!(
            leaf_ids.contains(&record.path.as_str()),
            "no leaf for {}",
            record.path
        );
    }
}

// ── Tiling properties ────────────────────────────────────────────────────────

#[test]
fn tiling_covers_bounds_without_overlap() {
    let records = library_records();
    let rects = tile(&records, 1000.0, 300.0);
    assert_eq!(rects.len(), records.len());

    let covered: f64 = rects.iter().map(TileRect::area).sum();
    assert!((covered - 300_000.0).abs() < 1e-3);

    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            let overlap_w = (a.x + a.width).min(b.x + b.width) - a.x.max(b.x);
            let overlap_h = (a.y + a.height).min(b.y + b.height) - a.y.max(b.y);
            assert!(
                overlap_w <= 1e-6 || overlap_h <= 1e-6,
                "{} overlaps {}",
                a.record.path,
                b.record.path
            );
        }
    }
}

#[test]
fn tiling_areas_track_record_sizes() {
    let records = library_records();
    let total: u64 = records.iter().map(|r| r.size).sum();
    let rects = tile(&records, 1000.0, 300.0);

    for rect in &rects {
        let expected = rect.record.size as f64 / total as f64 * 300_000.0;
        assert!(
            (rect.area() - expected).abs() < 1e-3,
            "area for {} drifted",
            rect.record.path
        );
    }
}

#[test]
fn tiling_and_tree_agree_on_join_keys() {
    // The frontend correlates selection across both views by path.
    let records = library_records();
    let tree = FileTree::build(&records);
    let rects = tile(&records, 1000.0, 300.0);

    let leaf_ids: Vec<&str> = walk(&tree)
        .into_iter()
        .filter(|&idx| tree.node(idx).kind == NodeKind::File)
        .map(|idx| tree.node(idx).id.as_str())
        .collect();
    for rect in &rects {
        assert!(
            leaf_ids.contains(&rect.record.path.as_str()),
            "rect for {} has no tree leaf",
            rect.record.path
        );
    }
}

// ── JSON boundary ────────────────────────────────────────────────────────────

#[test]
fn records_from_shell_payload_build_cleanly() {
    let payload = r#"[
        {
            "path": "Videos/Cooking/intro.mp4",
            "name": "intro.mp4",
            "extension": "mp4",
            "kind": "video",
            "size": 100,
            "modified": "2025-03-14T09:00:00Z"
        },
        {
            "path": "Videos\\Cooking\\outro.mp4",
            "name": "outro.mp4",
            "extension": "mp4",
            "kind": "video",
            "size": 200,
            "modified": "2025-03-15T09:00:00Z"
        }
    ]"#;
    let records: Vec<FileRecord> = serde_json::from_str(payload).unwrap();
    assert!(records.iter().all(|r| r.kind == FileKind::Video));

    let tree = FileTree::build(&records);
    let videos = tree.children(tree.root)[0];
    let cooking = tree.children(videos)[0];
    assert_eq!(tree.node(cooking).name, "Cooking");
    assert_eq!(tree.node(cooking).size, 300);
    // Folder timestamp is the most recent descendant's.
    assert_eq!(tree.node(cooking).modified, records[1].modified);
}
