use linked_bst::{Error, Tree};

use std::collections::HashSet;

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        xs.iter().all(|x| tree.find(x) == Some(x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.contains(x))
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        let mut still_present = xs;

        for delete in &deletes {
            // Only one copy goes per call, mirroring `Tree::remove`.
            match still_present.iter().position(|x| x == delete) {
                Some(pos) => {
                    still_present.swap_remove(pos);
                    if tree.remove(delete) != Ok(*delete) {
                        return false;
                    }
                }
                None => {
                    if tree.remove(delete) != Err(Error::KeyNotFound) {
                        return false;
                    }
                }
            }
        }

        still_present.sort();
        tree.len() == still_present.len() && tree.inorder().eq(still_present.iter())
    }
}

/// The values an iterator yields, sorted.
fn sorted_values<'a>(iter: impl Iterator<Item = &'a i8>) -> Vec<i8> {
    let mut values: Vec<_> = iter.copied().collect();
    values.sort();
    values
}

quickcheck::quickcheck! {
    fn traversals_visit_everything(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let mut sorted = xs;
        sorted.sort();

        let borrowed = sorted_values(tree.iter()) == sorted
            && sorted_values(tree.postorder()) == sorted
            && sorted_values(tree.levelorder()) == sorted;

        borrowed && tree.into_iter().eq(sorted)
    }
}

quickcheck::quickcheck! {
    fn preorder_rebuilds_the_same_tree(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.into_iter().collect();
        let rebuilt: Tree<_> = tree.iter().copied().collect();

        tree.iter().eq(rebuilt.iter()) && tree.height() == rebuilt.height()
    }
}
