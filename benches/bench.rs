use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bstree::{avl, bst};

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: usize) -> usize {
    2usize.pow(num_levels as u32) - 1
}

#[derive(Clone)]
enum TreeEnum {
    Plain(bst::Tree<i32>),
    Avl(avl::Tree<i32>),
}

impl TreeEnum {
    fn contains(&self, k: &i32) -> bool {
        match self {
            Self::Plain(t) => t.contains(k),
            Self::Avl(t) => t.contains(k),
        }
    }

    fn insert(&self, k: i32) -> Self {
        match self {
            Self::Plain(t) => Self::Plain(t.insert(k)),
            Self::Avl(t) => Self::Avl(t.insert(k)),
        }
    }

    fn delete(&self, k: &i32) -> Self {
        match self {
            Self::Plain(t) => Self::Plain(t.delete(k)),
            Self::Avl(t) => Self::Avl(t.delete(k)),
        }
    }
}

/// Builds trees from ascending keys: a list for the plain BST (unless it is
/// balanced afterwards) and a balanced tree for the AVL tree.
fn get_trees(num_levels: usize) -> [(&'static str, TreeEnum); 3] {
    let keys = 0..num_nodes_in_full_tree(num_levels) as i32;
    let unbalanced = bst::Tree::create(keys.clone());
    let balanced = unbalanced.balance();
    [
        ("unbalanced", TreeEnum::Plain(unbalanced)),
        ("balanced", TreeEnum::Plain(balanced)),
        ("avl", TreeEnum::Avl(avl::Tree::create(keys))),
    ]
}

/// Helper to bench a function on a BST.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// shapes of BSTs before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&TreeEnum, i32)) {
    let mut group = c.benchmark_group(name);

    // Inserting ascending keys into the plain BST recurses once per key, so stay well clear of
    // the stack limit.
    for num_levels in [3, 7, 11] {
        let largest_element_in_tree = num_nodes_in_full_tree(num_levels) as i32 - 1;
        for (name, tree) in get_trees(num_levels) {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_with_input(id, &largest_element_in_tree, |b, &i| {
                b.iter(|| f(&tree, black_box(i)))
            });
        }
    }

    group.finish();
}

/// Test BSTs. All tests are run against balanced and unbalanced trees of various sizes and test
/// successful and unsuccessful actions.
pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        black_box(tree.contains(&i));
    });
    bench_helper(c, "delete", |tree, i| {
        black_box(tree.delete(&i));
    });

    bench_helper(c, "insert", |tree, i| {
        black_box(tree.insert(i + 1));
    });

    bench_helper(c, "find-miss", |tree, i| {
        black_box(tree.contains(&(i + 1)));
    });
    bench_helper(c, "delete-miss", |tree, i| {
        black_box(tree.delete(&(i + 1)));
    });

    let mut group = c.benchmark_group("balance");
    for num_levels in [3, 7, 11] {
        let tree = bst::Tree::create(0..num_nodes_in_full_tree(num_levels) as i32);
        group.bench_with_input(BenchmarkId::from_parameter(num_levels), &tree, |b, tree| {
            b.iter(|| black_box(tree.balance()))
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
