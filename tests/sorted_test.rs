//! Tests for the sorted variant: sibling order is independent of input order

use rstest::{fixture, rstest};

use treeize::application::Department;
use treeize::domain::{OrphanPolicy, SortedTree, TreeBuilder, TreeNode};

fn dept(id: &str, name: &str, parent: Option<&str>, order: i64) -> Department {
    Department::new(id, name, parent).with_order(order)
}

#[fixture]
fn org_chart() -> Vec<Department> {
    vec![
        dept("tech", "R&D Center", None, 3),
        dept("opr", "Operations Center", None, 4),
        dept("admin", "Administration Center", None, 2),
        dept("boss", "Executive Office", None, 1),
        dept("product", "Product", Some("tech"), 1),
        dept("develop", "Development", Some("tech"), 2),
        dept("product-mw", "Platform Product", Some("product"), 1),
        dept("tech-be", "Backend", Some("develop"), 1),
        dept("tech-mw", "Platform Development", Some("develop"), 2),
        dept("tech-fe", "Frontend", Some("develop"), 3),
        dept("sec", "Secretariat", Some("boss"), 1),
        dept("admin2", "Administration", Some("admin"), 1),
        dept("hr", "Human Resources", Some("admin"), 2),
        dept("job", "Recruiting", Some("hr"), 1),
        dept("salary", "Payroll", Some("hr"), 2),
        dept("opr-sku", "Merchandise Operations", Some("opr"), 2),
        dept("opr-act", "Campaign Operations", Some("opr"), 3),
        dept("opr-mw", "Platform Operations", Some("opr"), 1),
    ]
}

const EXPECTED: &str = "\
1.Executive Office
+-1.Secretariat
2.Administration Center
+-1.Administration
+-2.Human Resources
+---1.Recruiting
+---2.Payroll
3.R&D Center
+-1.Product
+---1.Platform Product
+-2.Development
+---1.Backend
+---2.Platform Development
+---3.Frontend
4.Operations Center
+-1.Platform Operations
+-2.Merchandise Operations
+-3.Campaign Operations";

fn render(tree: &SortedTree<Department>) -> String {
    tree.render_to_string(|d| d.label(true), Some("+-"), "--")
        .unwrap()
}

#[rstest]
#[case::as_listed(0, false)]
#[case::reversed(0, true)]
#[case::rotated(7, false)]
#[case::rotated_reversed(11, true)]
fn given_any_input_order_when_building_sorted_forest_then_output_is_identical(
    mut org_chart: Vec<Department>,
    #[case] rotate: usize,
    #[case] reverse: bool,
) {
    org_chart.rotate_left(rotate);
    if reverse {
        org_chart.reverse();
    }

    let tree = SortedTree::build_sorted(org_chart, true, None).unwrap();

    assert_eq!(render(&tree), EXPECTED);
    assert_eq!(tree.cached_size(), 18);
}

#[rstest]
fn given_sorted_forest_when_checking_siblings_then_orders_never_decrease(
    org_chart: Vec<Department>,
) {
    let tree = TreeBuilder::forest().build_sorted(org_chart).unwrap();

    let tops: Vec<i64> = tree
        .top_nodes()
        .iter()
        .map(|&id| tree.value(id).unwrap().order)
        .collect();
    assert!(tops.windows(2).all(|w| w[0] <= w[1]));

    for node in tree.flatten() {
        let orders: Vec<i64> = tree
            .children(node)
            .iter()
            .map(|&id| tree.value(id).unwrap().order)
            .collect();
        assert!(orders.windows(2).all(|w| w[0] <= w[1]), "unsorted below {}", node);
    }
}

#[rstest]
fn given_orphan_with_low_order_when_promoting_then_sorted_among_tops(
    mut org_chart: Vec<Department>,
) {
    org_chart.push(dept("lost", "Lost and Found", Some("gone"), 0));

    let tree = TreeBuilder::forest()
        .orphan_policy(OrphanPolicy::Top)
        .build_sorted(org_chart)
        .unwrap();

    let first = tree.top_nodes()[0];
    assert_eq!(tree.value(first).unwrap().identifier(), "lost");
    assert_eq!(tree.top_nodes().len(), 5);
    assert_eq!(tree.size(), 19);
}

#[test]
fn given_equal_orders_when_building_sorted_then_input_order_breaks_ties() {
    let nodes = vec![
        dept("root", "Root", None, 0),
        dept("b", "B", Some("root"), 1),
        dept("a", "A", Some("root"), 1),
        dept("c", "C", Some("root"), 0),
    ];
    let tree = SortedTree::build_sorted(nodes, false, None).unwrap();
    let root = tree.root().unwrap();

    let ids: Vec<String> = tree
        .children(root)
        .iter()
        .map(|&id| tree.value(id).unwrap().identifier())
        .collect();
    assert_eq!(ids, vec!["c", "b", "a"]);
}
