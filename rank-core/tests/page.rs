use rank_core::constants::SORTED_EVENT;
use rank_core::sorter::{can_move, is_draggable};
use rank_core::{
    Dom, FlagHandle, NodeId, RankBoard, RankError, RankRewrite, Registration, SortableOptions,
    SortableRegistry, Tree, on_drop, update_team, update_team_datalist, wire_subtree,
};

struct Page {
    tree: Tree,
    form: NodeId,
    datalist: NodeId,
}

impl Page {
    fn new() -> Self {
        let mut tree = Tree::new();
        let root = tree.root();
        let datalist = tree.append_element(root, "datalist", Some("teams"), &[]);
        let form = tree.append_element(root, "form", Some("fixture"), &[]);
        Page {
            tree,
            form,
            datalist,
        }
    }

    fn team_input(&mut self, value: &str) -> NodeId {
        let el = self
            .tree
            .append_element(self.form, "input", None, &["team-selection", "form-control"]);
        self.tree.set_node_value(el, value);
        el
    }

    fn container(&mut self, id: &str, classes: &[&str]) -> NodeId {
        let mut all = vec!["sortable"];
        all.extend_from_slice(classes);
        self.tree.append_element(self.form, "ul", Some(id), &all)
    }

    /// `<li><span class="handle"/><input type="hidden" id="user-.."/></li>`
    fn item(&mut self, container: NodeId, value: &str, classes: &[&str]) -> (NodeId, NodeId) {
        let li = self.tree.append_element(container, "li", None, classes);
        self.tree.append_element(li, "span", None, &["handle"]);
        let username = value.split("--").nth(1).unwrap_or_default();
        let id = format!("user-{username}");
        let input = self.tree.append_element(li, "input", Some(id.as_str()), &[]);
        self.tree.set_node_value(input, value);
        (li, input)
    }

    fn border_classes(&self, el: NodeId) -> Vec<String> {
        self.tree
            .classes(&el)
            .into_iter()
            .filter(|c| c.starts_with("border-"))
            .collect()
    }

    fn options(&self) -> Vec<String> {
        self.tree
            .children(self.datalist)
            .iter()
            .map(|o| self.tree.value(o))
            .collect()
    }
}

#[test]
fn equal_teams_share_a_colour_and_empty_gets_none() {
    let mut page = Page::new();
    let inputs: Vec<NodeId> = ["Red", "", "Blue", "Red", "Green", "Blue"]
        .into_iter()
        .map(|v| page.team_input(v))
        .collect();

    update_team_datalist(&mut page.tree).unwrap();

    let colours: Vec<Vec<String>> = inputs.iter().map(|i| page.border_classes(*i)).collect();
    assert_eq!(colours[0], vec!["border-primary".to_string()]);
    assert!(colours[1].is_empty());
    assert_eq!(colours[2], vec!["border-success".to_string()]);
    assert_eq!(colours[3], colours[0]);
    assert_eq!(colours[4], vec!["border-danger".to_string()]);
    assert_eq!(colours[5], colours[2]);
    assert_ne!(colours[0], colours[2]);
    // unrelated classes survive
    assert!(page.tree.has_class(&inputs[0], "form-control"));
}

#[test]
fn datalist_lists_distinct_teams_in_first_seen_order() {
    let mut page = Page::new();
    for v in ["Blue", "Red", "", "Blue", "Yellow", "Red"] {
        page.team_input(v);
    }
    let colors = update_team_datalist(&mut page.tree).unwrap();
    assert_eq!(page.options(), vec!["Blue", "Red", "Yellow"]);
    assert_eq!(colors.teams(), ["Blue", "Red", "Yellow"]);
}

#[test]
fn stale_border_classes_are_stripped() {
    let mut page = Page::new();
    let a = page.team_input("");
    page.tree.add_class(&a, "border-dark").unwrap();
    page.tree.add_class(&a, "border-undefined").unwrap();
    let b = page.team_input("Red");
    page.tree.add_class(&b, "border-info").unwrap();

    update_team_datalist(&mut page.tree).unwrap();

    assert!(page.border_classes(a).is_empty());
    assert_eq!(page.border_classes(b), vec!["border-primary".to_string()]);
}

#[test]
fn colorizer_is_idempotent() {
    let mut page = Page::new();
    for v in ["A", "B", "", "A"] {
        page.team_input(v);
    }
    update_team_datalist(&mut page.tree).unwrap();
    let first = page.tree.clone();
    let first_options = page.options();
    update_team_datalist(&mut page.tree).unwrap();

    for input in page.tree.query_class(None, "team-selection").unwrap() {
        assert_eq!(page.tree.classes(&input), first.classes(&input));
    }
    assert_eq!(page.options(), first_options);
}

#[test]
fn colours_follow_first_seen_order_on_each_pass() {
    let mut page = Page::new();
    let a = page.team_input("A");
    let b = page.team_input("B");
    update_team_datalist(&mut page.tree).unwrap();
    assert_eq!(page.border_classes(b), vec!["border-success".to_string()]);

    page.tree.set_node_value(a, "");
    update_team_datalist(&mut page.tree).unwrap();
    assert_eq!(page.border_classes(b), vec!["border-primary".to_string()]);
    assert_eq!(page.options(), vec!["B"]);
}

#[test]
fn eighth_team_cycles_back_to_the_first_colour() {
    let mut page = Page::new();
    let inputs: Vec<NodeId> = (0..8).map(|i| page.team_input(&format!("T{i}"))).collect();
    update_team_datalist(&mut page.tree).unwrap();
    assert_eq!(page.border_classes(inputs[7]), vec!["border-primary".to_string()]);
    assert_eq!(page.border_classes(inputs[6]), vec!["border-dark".to_string()]);
}

#[test]
fn colorizer_requires_the_datalist() {
    let mut tree = Tree::new();
    assert_eq!(
        update_team_datalist(&mut tree),
        Err(RankError::NotFound("teams".into()))
    );
}

#[test]
fn update_team_only_touches_the_team() {
    let mut page = Page::new();
    let list = page.container("3", &[]);
    let (_, input) = page.item(list, "3--alice--Blue", &[]);

    let entry = update_team(&mut page.tree, "alice", "Red").unwrap();

    assert_eq!(page.tree.value(&input), "3--alice--Red");
    assert_eq!(entry.rank, "3");
    assert_eq!(entry.username, "alice");
}

#[test]
fn update_team_rejects_separator_in_team() {
    let mut page = Page::new();
    let list = page.container("1", &[]);
    let (_, input) = page.item(list, "1--alice--", &[]);
    assert_eq!(
        update_team(&mut page.tree, "alice", "Red--Sox"),
        Err(RankError::Separator("Red--Sox".into()))
    );
    assert_eq!(page.tree.value(&input), "1--alice--");
}

#[test]
fn drop_rewrites_rank_and_bubbles_sorted() {
    let mut page = Page::new();
    let from = page.container("5", &[]);
    let to = page.container("2", &[]);
    let (li, input) = page.item(from, "5--bob--Green", &[]);

    page.tree.insert_child(to, li, 0);
    let value = on_drop(&mut page.tree, &li, &to, RankRewrite::Reencode).unwrap();

    assert_eq!(value, "2--bob--Green");
    assert_eq!(page.tree.value(&input), "2--bob--Green");
    assert!(page.tree.observed_by(page.form, SORTED_EVENT));
    let events = page.tree.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target, li);
    assert!(events[0].bubbles);
}

#[test]
fn drop_leaves_digits_in_username_alone() {
    for rewrite in [RankRewrite::Reencode, RankRewrite::FirstDigitRun] {
        let mut page = Page::new();
        let from = page.container("5", &[]);
        let to = page.container("2", &[]);
        let (li, input) = page.item(from, "5--bob2--Green", &[]);
        page.tree.insert_child(to, li, 0);
        on_drop(&mut page.tree, &li, &to, rewrite).unwrap();
        assert_eq!(page.tree.value(&input), "2--bob2--Green");
    }
}

#[test]
fn rewrite_modes_differ_on_multi_digit_ranks() {
    let mut page = Page::new();
    let from = page.container("12", &[]);
    let to = page.container("3", &[]);
    let (li, input) = page.item(from, "12--carol--", &[]);
    on_drop(&mut page.tree, &li, &to, RankRewrite::FirstDigitRun).unwrap();
    assert_eq!(page.tree.value(&input), "3--carol--");

    page.tree.set_node_value(input, "carol--x--1");
    assert!(matches!(
        on_drop(&mut page.tree, &li, &to, RankRewrite::FirstDigitRun),
        Ok(ref v) if v == "carol--x--3"
    ));
    page.tree.set_node_value(input, "bad");
    assert!(matches!(
        on_drop(&mut page.tree, &li, &to, RankRewrite::Reencode),
        Err(RankError::Malformed { fields: 1, .. })
    ));
}

#[test]
fn drop_failures_do_not_emit_sorted() {
    let mut page = Page::new();
    let to = page.container("1", &[]);
    let bare = page.tree.append_element(to, "li", None, &[]);
    assert_eq!(
        on_drop(&mut page.tree, &bare, &to, RankRewrite::Reencode),
        Err(RankError::MissingInput)
    );

    let nameless = page.tree.append_element(page.form, "ul", None, &["sortable"]);
    let (li, _) = page.item(to, "1--dan--", &[]);
    assert_eq!(
        on_drop(&mut page.tree, &li, &nameless, RankRewrite::Reencode),
        Err(RankError::MissingContainerId)
    );
    assert!(page.tree.events().is_empty());
}

#[test]
fn failed_drop_leaves_value_and_next_drop_still_works() {
    let mut page = Page::new();
    let from = page.container("4", &[]);
    let to = page.container("1", &[]);
    let (broken, broken_input) = page.item(from, "4--eve--", &[]);
    let (ok, ok_input) = page.item(from, "4--fay--Red", &[]);
    page.tree.set_node_value(broken_input, "4--eve");

    page.tree.insert_child(to, broken, 0);
    assert!(on_drop(&mut page.tree, &broken, &to, RankRewrite::Reencode).is_err());
    assert_eq!(page.tree.value(&broken_input), "4--eve");
    assert!(page.tree.events().is_empty());

    page.tree.insert_child(to, ok, 1);
    on_drop(&mut page.tree, &ok, &to, RankRewrite::Reencode).unwrap();
    assert_eq!(page.tree.value(&ok_input), "1--fay--Red");
    assert_eq!(page.tree.events().len(), 1);
    assert_eq!(page.tree.events()[0].target, ok);
}

#[test]
fn no_sort_items_and_disabled_containers_refuse_drag() {
    let mut page = Page::new();
    let open = page.container("1", &[]);
    let locked = page.container("2", &["disabled"]);
    let (free, _) = page.item(open, "1--a--", &[]);
    let (pinned, _) = page.item(open, "1--b--", &["no-sort"]);
    let (inside_locked, _) = page.item(locked, "2--c--", &[]);

    let mut registry: SortableRegistry<NodeId, FlagHandle> = SortableRegistry::new();
    wire_subtree(
        &page.tree,
        None,
        &mut registry,
        &SortableOptions::default(),
        |_, opts| Ok(FlagHandle::new(opts)),
    )
    .unwrap();

    assert!(registry.can_drag(&page.tree, "1", &free));
    assert!(!registry.can_drag(&page.tree, "1", &pinned));
    assert!(!registry.can_drag(&page.tree, "2", &inside_locked));
    assert!(!is_draggable(&page.tree, &pinned));
    assert!(can_move(&page.tree, &free));
    assert!(!can_move(&page.tree, &pinned));
}

#[test]
fn swap_re_enables_surviving_controllers() {
    let mut page = Page::new();
    page.container("1", &[]);
    page.container("2", &["disabled"]);
    let mut registry: SortableRegistry<NodeId, FlagHandle> = SortableRegistry::new();
    let base = SortableOptions::default();
    wire_subtree(&page.tree, None, &mut registry, &base, |_, o| {
        Ok(FlagHandle::new(o))
    })
    .unwrap();
    registry.disable("1");
    assert_eq!(registry.is_disabled("1"), Some(true));
    assert_eq!(registry.is_disabled("2"), Some(true));

    assert_eq!(registry.enable_all(), 2);
    assert_eq!(registry.is_disabled("1"), Some(false));
    assert_eq!(registry.is_disabled("2"), Some(false));
}

#[test]
fn rewiring_a_loaded_subtree_does_not_double_register() {
    let mut page = Page::new();
    let first = page.container("1", &[]);
    page.container("2", &[]);
    let mut registry: SortableRegistry<NodeId, FlagHandle> = SortableRegistry::new();
    let base = SortableOptions::default();
    let mut built = 0;
    let mut make = |_: &NodeId, o: &SortableOptions| -> rank_core::Result<FlagHandle> {
        built += 1;
        Ok(FlagHandle::new(o))
    };

    let report = wire_subtree(&page.tree, None, &mut registry, &base, &mut make).unwrap();
    assert_eq!((report.new, report.existing), (2, 0));
    let report = wire_subtree(&page.tree, Some(&page.form), &mut registry, &base, &mut make).unwrap();
    assert_eq!((report.new, report.existing), (0, 2));

    // htmx replaced container 1 with a fresh element under the same id
    page.tree.remove(first);
    let fresh = page.container("1", &[]);
    page.tree.append_element(page.form, "ul", None, &["sortable"]);
    let report = wire_subtree(&page.tree, None, &mut registry, &base, &mut make).unwrap();
    assert_eq!(report.replaced, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(built, 3);
    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.register("1", fresh, |_| Ok(FlagHandle::default())).unwrap(),
        Registration::Existing
    );

    let tree = &page.tree;
    assert_eq!(registry.retain(|_, el| tree.is_attached(*el)), 0);
}

#[test]
fn board_snapshot_groups_ranks() {
    let mut page = Page::new();
    let unranked = page.container("0", &[]);
    let first = page.container("1", &[]);
    let third = page.container("3", &[]);
    page.item(unranked, "0--erin--", &[]);
    page.item(first, "1--alice--Red", &[]);
    page.item(third, "3--bob--Blue", &[]);
    page.item(third, "3--carl--Red", &[]);

    let board = RankBoard::collect(&page.tree).unwrap();
    let grouped = board.grouped();
    assert_eq!(grouped[&0], vec!["erin".to_string()]);
    assert_eq!(grouped[&1], vec!["alice".to_string()]);
    assert!(grouped[&2].is_empty());
    assert_eq!(grouped[&3], vec!["bob".to_string(), "carl".to_string()]);
    assert_eq!(board.unranked(), vec!["erin".to_string()]);
    assert_eq!(board.teams(), vec!["Red".to_string(), "Blue".to_string()]);

    let json = serde_json::to_value(board.summary()).unwrap();
    assert_eq!(json["grouped"]["3"][1], "carl");
}
