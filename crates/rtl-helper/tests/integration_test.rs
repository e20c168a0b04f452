//! Integration tests: the demo fixture and script through the host loop.

use rtl_helper::{Host, Script};
use rtl_helper_core::HelperConfig;
use rtl_helper_dom::{Document, NodeSnapshot, NodeSpec, SnapshotChild};

const BOARD: &str = include_str!("../../../demos/board.json");
const SCRIPT: &str = include_str!("../../../demos/script.json");
const CONFIG: &str = include_str!("../../../demos/config.yaml");

fn host() -> (Host, Script) {
    let spec = NodeSpec::from_json(BOARD).unwrap();
    let doc = Document::from_spec(&spec).unwrap();
    let script = Script::from_json(SCRIPT).unwrap();
    let config = HelperConfig::from_yaml(CONFIG).unwrap();
    (Host::new(doc, config, script.location.clone()), script)
}

fn element<'a>(snapshot: &'a NodeSnapshot, path: &[usize]) -> &'a NodeSnapshot {
    let mut node = snapshot;
    for &index in path {
        node = match &node.children[index] {
            SnapshotChild::Element(child) => child,
            SnapshotChild::Text(text) => panic!("expected element, found text {:?}", text),
        };
    }
    node
}

#[test]
fn demo_config_is_the_default() {
    assert_eq!(HelperConfig::from_yaml(CONFIG).unwrap(), HelperConfig::default());
}

#[tokio::test(start_paused = true)]
async fn demo_script_styles_board() {
    let (mut host, script) = host();

    let initial = host.start().await.unwrap();
    // list title, two cards, wrapper block, board tile
    assert_eq!(initial.dispatched, 5);

    host.run(&script).await.unwrap();
    let snapshot = host.snapshot().unwrap();
    let (_doc, summary) = host.finish();

    assert_eq!(summary.steps, script.steps.len());
    // resize, focus, navigation, manual
    assert_eq!(summary.retriggers, 4);
    assert_eq!(summary.report.failed, 0);

    let list_title = element(&snapshot, &[0, 0]);
    assert_eq!(list_title.classes, vec!["rtl-content"]);
    assert_eq!(list_title.style["text-align"], "right");

    let edited_card = element(&snapshot, &[0, 1]);
    assert_eq!(edited_card.classes, vec!["rtl-content"]);
    assert_eq!(edited_card.style["direction"], "rtl");

    let wrapper = element(&snapshot, &[1]);
    assert!(wrapper.classes.contains(&"rtl-content".to_string()));
    let ul = element(&snapshot, &[1, 1]);
    assert_eq!(ul.style["padding-right"], "24px");
    let code = element(&snapshot, &[1, 2, 0]);
    assert_eq!(code.classes, vec!["force-ltr"]);
    assert_eq!(code.style["direction"], "ltr !important");
    let link = element(&snapshot, &[1, 3]);
    assert_eq!(link.classes, vec!["force-ltr"]);

    let tile = element(&snapshot, &[2]);
    assert!(tile.classes.contains(&"rtl-content".to_string()));

    let comment = element(&snapshot, &[3]);
    assert_eq!(comment.classes, vec!["ltr-content"]);
    assert_eq!(comment.style["direction"], "ltr");
}

#[tokio::test(start_paused = true)]
async fn snapshot_serializes_to_json() {
    let (mut host, _script) = host();
    host.start().await.unwrap();

    let json = serde_json::to_value(host.snapshot().unwrap()).unwrap();
    assert_eq!(json["tag"], "body");
    assert_eq!(json["children"][0]["children"][0]["classes"][0], "rtl-content");
    host.finish();
}
