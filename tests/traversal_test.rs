//! Tests for traversal and queries over built trees

use std::cell::Cell;

use rstest::{fixture, rstest};

use treeize::application::Department;
use treeize::domain::{NodeId, Tree, TraversingAction, TreeNode};

//  company
//  ├── admin
//  │   ├── admin2
//  │   └── hr
//  │       ├── job
//  │       └── salary
//  └── tech
//      └── develop
#[fixture]
fn company() -> Tree<Department> {
    let nodes = vec![
        Department::new("company", "Company", None),
        Department::new("admin", "Administration", Some("company")),
        Department::new("tech", "Technology", Some("company")),
        Department::new("admin2", "Office", Some("admin")),
        Department::new("hr", "Human Resources", Some("admin")),
        Department::new("job", "Recruiting", Some("hr")),
        Department::new("salary", "Payroll", Some("hr")),
        Department::new("develop", "Development", Some("tech")),
    ];
    Tree::build(nodes, false, None).unwrap()
}

fn id(tree: &Tree<Department>, key: &str) -> NodeId {
    tree.lookup(&key.to_string()).unwrap()
}

fn names(tree: &Tree<Department>, nodes: &[NodeId]) -> Vec<String> {
    nodes.iter().map(|&n| tree.value(n).unwrap().identifier()).collect()
}

#[rstest]
fn given_tree_when_flattening_then_visits_subtree_before_next_sibling(company: Tree<Department>) {
    assert_eq!(
        names(&company, &company.flatten()),
        vec!["company", "admin", "admin2", "hr", "job", "salary", "tech", "develop"]
    );
}

#[rstest]
fn given_predicate_when_flattening_then_keeps_matching_in_order(company: Tree<Department>) {
    let flat = company.flatten_filtered(|d| d.id.contains('a'));
    assert_eq!(names(&company, &flat), vec!["company", "admin", "admin2", "salary"]);
}

#[rstest]
fn given_start_node_when_flattening_then_covers_only_its_subtree(company: Tree<Department>) {
    let hr = id(&company, "hr");
    let flat = company.flatten_from(&[hr], |_| true);
    assert_eq!(names(&company, &flat), vec!["hr", "job", "salary"]);
}

#[rstest]
fn given_match_when_finding_then_later_nodes_are_never_visited(company: Tree<Department>) {
    let (admin2, hr, tech) = (id(&company, "admin2"), id(&company, "hr"), id(&company, "tech"));
    let calls = Cell::new(0);
    let visited_tech = Cell::new(false);

    let found = company.find_from(&[admin2, hr, tech], |d| {
        calls.set(calls.get() + 1);
        if d.id == "tech" {
            visited_tech.set(true);
        }
        d.id == "hr"
    });

    assert_eq!(found, Some(hr));
    assert_eq!(calls.get(), 2);
    assert!(!visited_tech.get());
}

#[rstest]
fn given_stop_action_when_walking_then_halts_immediately(company: Tree<Department>) {
    let mut seen = Vec::new();
    company.walk_all(|_, d| {
        seen.push(d.id.clone());
        if d.id == "hr" {
            TraversingAction::Stop
        } else {
            TraversingAction::Continue
        }
    });
    assert_eq!(seen, vec!["company", "admin", "admin2", "hr"]);
}

#[rstest]
fn given_no_match_when_finding_then_returns_none(company: Tree<Department>) {
    assert!(company.find(|d| d.id == "nowhere").is_none());
}

#[rstest]
fn given_unchanged_tree_when_querying_twice_then_results_are_identical(company: Tree<Department>) {
    assert_eq!(company.flatten(), company.flatten());
    assert_eq!(company.find(|d| d.id == "job"), company.find(|d| d.id == "job"));
    assert_eq!(
        company.map_by(|d| d.id.clone()),
        company.map_by(|d| d.id.clone())
    );
}

#[rstest]
fn given_key_function_when_mapping_then_preserves_visit_order(company: Tree<Department>) {
    let map = company.map_by(|d| d.id.clone());
    let keys: Vec<_> = map.keys().cloned().collect();
    assert_eq!(keys, names(&company, &company.flatten()));
    assert_eq!(map["job"], id(&company, "job"));
}

#[rstest]
fn given_colliding_keys_when_mapping_then_later_visit_wins(company: Tree<Department>) {
    let map = company.map_by_filtered(|d| d.id.len(), |d| d.id != "company");
    // admin2 and salary both have length 6
    assert_eq!(map.len(), 6);
    assert_eq!(map[&5], id(&company, "admin"));
    assert_eq!(map[&6], id(&company, "salary"));
    assert_eq!(map[&7], id(&company, "develop"));
}

#[rstest]
fn given_any_node_when_computing_layer_then_parent_layer_plus_one(company: Tree<Department>) {
    for node in company.flatten() {
        match company.parent(node) {
            None => assert_eq!(company.layer(node).unwrap(), 0),
            Some(parent) => assert_eq!(
                company.layer(node).unwrap(),
                company.layer(parent).unwrap() + 1
            ),
        }
    }
}

#[rstest]
fn given_any_node_when_building_path_then_matches_parent_chain(company: Tree<Department>) {
    for node in company.flatten() {
        let mut expected = vec![company.value(node).unwrap().id.clone()];
        let mut current = node;
        while let Some(parent) = company.parent(current) {
            expected.insert(0, company.value(parent).unwrap().id.clone());
            current = parent;
        }
        assert_eq!(
            company.path(node, |d| d.id.clone(), " > ").unwrap(),
            expected.join(" > ")
        );
    }
    assert_eq!(
        company.path(id(&company, "salary"), |d| d.id.clone(), "/").unwrap(),
        "company/admin/hr/salary"
    );
}

#[rstest]
fn given_mutation_when_counting_then_live_size_diverges_from_cached(mut company: Tree<Department>) {
    assert_eq!(company.size(), company.cached_size());

    company.isolate(id(&company, "hr")).unwrap();

    assert_eq!(company.cached_size(), 8);
    assert_eq!(company.size(), 5);
}

#[rstest]
fn given_moved_subtree_when_rendering_then_uses_fresh_layers(mut company: Tree<Department>) {
    let (hr, develop) = (id(&company, "hr"), id(&company, "develop"));
    assert!(company.add_child(develop, hr).unwrap());

    let text = company
        .render_to_string(|d| d.id.clone(), None, "  ")
        .unwrap();
    let expected = [
        "company",
        "  admin",
        "    admin2",
        "  tech",
        "    develop",
        "      hr",
        "        job",
        "        salary",
    ]
    .join("\n");
    assert_eq!(text, expected);
}

#[rstest]
fn given_line_sink_when_rendering_then_emits_one_line_per_node(company: Tree<Department>) {
    let mut lines = Vec::new();
    company
        .render(|l| lines.push(l), |d| d.name.clone(), Some("+-"), "--")
        .unwrap();

    assert_eq!(lines.len(), company.size());
    assert_eq!(lines[0], "Company");
    assert_eq!(lines[4], "+-----Recruiting");
}

#[rstest]
fn given_tree_when_collecting_leaves_then_returns_childless_nodes(company: Tree<Department>) {
    assert_eq!(
        names(&company, &company.leaves()),
        vec!["admin2", "job", "salary", "develop"]
    );
    assert_eq!(company.depth().unwrap(), 4);
}
