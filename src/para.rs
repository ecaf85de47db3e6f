//! PARA folder search over the flat parent-pointer mailbox list.
//!
//! One parameterized resolver serves both callers: `archive-folder`
//! searches with `max_depth = Some(1)` (immediate children of the PARA
//! roots only), `file-email` defaults to unbounded depth.

use std::collections::{HashMap, HashSet};

use crate::jmap::types::Mailbox;

/// Search anchors, in fixed search order. Matched by exact,
/// case-sensitive name.
pub const PARA_ROOTS: [&str; 3] = ["100_projects", "200_areas", "300_resources"];

/// Destination anchor for `archive-folder`.
pub const ARCHIVE_ROOT: &str = "400_archives";

/// A folder located under one of the PARA roots, annotated with which
/// root it was found under.
#[derive(Debug, Clone)]
pub struct ParaMatch {
    pub mailbox: Mailbox,
    pub para_parent: String,
    pub para_parent_id: String,
}

/// Groups mailboxes by parent id, preserving flat-list order within each
/// group. `None` collects the root-level folders. Search uses the groups
/// as-is; display sorts siblings by `sort_order` separately.
pub fn children_map(mailboxes: &[Mailbox]) -> HashMap<Option<&str>, Vec<&Mailbox>> {
    let mut map: HashMap<Option<&str>, Vec<&Mailbox>> = HashMap::new();
    for mailbox in mailboxes {
        map.entry(mailbox.parent_id.as_deref())
            .or_default()
            .push(mailbox);
    }
    map
}

/// Locates `name` by exact match among the descendants of the PARA roots.
///
/// Depth counts edges from the PARA root: the root is 0, its immediate
/// children 1. A folder beyond `max_depth` is neither matched nor
/// expanded. First match wins; roots are tried in `PARA_ROOTS` order and
/// children in flat-list order. A miss is a normal `None`, never an
/// error. A visited-id set keeps corrupted cyclic `parentId` chains from
/// looping.
pub fn find_para_folder(
    mailboxes: &[Mailbox],
    name: &str,
    max_depth: Option<u32>,
) -> Option<ParaMatch> {
    let children = children_map(mailboxes);

    for root_name in PARA_ROOTS {
        let Some(root) = mailboxes.iter().find(|mb| mb.name == root_name) else {
            continue;
        };

        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(root.id.as_str());
        let mut stack: Vec<(&Mailbox, u32)> = Vec::new();
        push_children(&children, &root.id, 1, max_depth, &mut visited, &mut stack);

        while let Some((mailbox, depth)) = stack.pop() {
            if mailbox.name == name {
                return Some(ParaMatch {
                    mailbox: mailbox.clone(),
                    para_parent: root_name.to_string(),
                    para_parent_id: root.id.clone(),
                });
            }
            push_children(
                &children,
                &mailbox.id,
                depth + 1,
                max_depth,
                &mut visited,
                &mut stack,
            );
        }
    }

    None
}

/// Pushes the children of `parent_id` at `depth`, reversed so the stack
/// pops them in flat-list order (depth-first, first match wins).
fn push_children<'a>(
    children: &HashMap<Option<&str>, Vec<&'a Mailbox>>,
    parent_id: &str,
    depth: u32,
    max_depth: Option<u32>,
    visited: &mut HashSet<&'a str>,
    stack: &mut Vec<(&'a Mailbox, u32)>,
) {
    if matches!(max_depth, Some(max) if depth > max) {
        return;
    }
    let Some(group) = children.get(&Some(parent_id)) else {
        return;
    };
    for child in group.iter().rev() {
        if visited.insert(child.id.as_str()) {
            stack.push((child, depth));
        }
    }
}
