use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use linked_bst::Tree;

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: usize) -> usize {
    2usize.pow(num_levels as u32) - 1
}

/// Builds a tree by adding values in ascending order. The tree never balances itself, so this
/// is a list hanging off the root's right.
fn get_unbalanced_tree(num_levels: usize) -> Tree<i32> {
    (0..).take(num_nodes_in_full_tree(num_levels)).collect()
}

/// Builds the same tree as [`get_unbalanced_tree`] and then rebalances it so every level is
/// full.
fn get_rebalanced_tree(num_levels: usize) -> Tree<i32> {
    let mut tree = get_unbalanced_tree(num_levels);
    tree.rebalance();
    tree
}

/// Helper to bench a function on a BST.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// shapes of BSTs before finishing the group. Every iteration gets a fresh clone of the tree so
/// mutating closures always start from the same shape.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut Tree<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    // For trees of size 2^3, 2^7, etc....
    for num_levels in [3, 7, 11] {
        let tree_tests = [
            ("unbalanced", get_unbalanced_tree(num_levels)),
            ("rebalanced", get_rebalanced_tree(num_levels)),
        ];
        let largest_element_in_tree = num_nodes_in_full_tree(num_levels) as i32 - 1;
        for (name, tree) in tree_tests {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

/// Test BSTs. All tests are run against unbalanced and rebalanced trees of various sizes and test
/// successful and unsuccessful actions.
pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        let _value = black_box(tree.find(&i));
    });
    bench_helper(c, "remove", |tree, i| {
        let _value = black_box(tree.remove(&i));
    });

    bench_helper(c, "add", |tree, i| {
        tree.add(i + 1);
    });

    bench_helper(c, "find-miss", |tree, i| {
        let _value = black_box(tree.find(&(i + 1)));
    });
    bench_helper(c, "remove-miss", |tree, i| {
        let _value = black_box(tree.remove(&(i + 1)));
    });

    bench_helper(c, "successor", |tree, i| {
        let _value = black_box(tree.successor(&(i / 2)));
    });
    bench_helper(c, "range-find", |tree, i| {
        let _values = black_box(tree.range_find(&(i / 4), &(i / 2)));
    });
    bench_helper(c, "rebalance", |tree, _| {
        tree.rebalance();
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
