use std::sync::Arc;
use std::thread;

use mapcss_rules::{class, tag, Rule, RuleIndex, RuleMatch, Tags};

#[test]
fn match_across_threads() {
    let index = Arc::new(RuleIndex::new(vec![
        Rule::new("way").unwrap().when(tag("highway").eq("primary")),
        Rule::new("way")
            .unwrap()
            .zoom(14, 19)
            .when(tag("bridge").is_true())
            .when(class("casing")),
        Rule::new("node").unwrap().when(tag("amenity").eq("cafe")),
        Rule::new("area").unwrap().when(tag("natural").eq("water")),
    ]));

    let features = vec![
        ("line", Tags::new().set("highway", "primary"), 10),
        ("line", Tags::new().set("highway", "primary").set("bridge", "yes"), 15),
        ("node", Tags::new().set("amenity", "cafe"), 17),
        ("area", Tags::new().set("natural", "water"), 5),
        ("node", Tags::new().set("natural", "water"), 5),
    ];

    let handles: Vec<_> = features
        .into_iter()
        .map(|(obj, tags, zoom)| {
            let index = Arc::clone(&index);
            thread::spawn(move || {
                index
                    .matching(obj, &tags, zoom)
                    .iter()
                    .map(|m| (m.index, m.class.map(str::to_owned)))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<(usize, Option<String>)>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results[0], vec![(0, None)]);
    assert_eq!(results[1], vec![(0, None), (1, Some("casing".to_owned()))]);
    assert_eq!(results[2], vec![(2, None)]);
    assert_eq!(results[3], vec![(3, None)]);
    assert!(results[4].is_empty());
}

#[test]
fn shared_rule_tested_concurrently() {
    let rule = Arc::new(
        Rule::new("way")
            .unwrap()
            .when(tag("highway").matches("motorway|trunk").unwrap())
            .when(class("major")),
    );

    let handles: Vec<_> = ["motorway", "trunk_link", "residential", "MOTORWAY"]
        .into_iter()
        .map(|value| {
            let rule = Arc::clone(&rule);
            thread::spawn(move || {
                let tags = Tags::new().set("highway", value);
                rule.test("line", &tags, 12).class().map(str::to_owned)
            })
        })
        .collect();

    let results: Vec<Option<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        results,
        vec![
            Some("major".to_owned()),
            Some("major".to_owned()),
            None,
            Some("major".to_owned()),
        ]
    );
}

#[test]
fn index_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RuleIndex>();
    assert_send_sync::<Rule>();
    assert_send_sync::<RuleMatch<'static>>();
}
