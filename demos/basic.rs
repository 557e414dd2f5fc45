use mapcss_rules::{Condition, Rule, RuleIndex, Tags};

fn main() {
    // Rules as a stylesheet parser would hand them over.
    let mut primary = Rule::new("way").expect("valid subject");
    primary.min_zoom = 8;
    primary
        .conditions
        .push(Condition::new("eq", ["highway", "primary"]).expect("valid condition"));

    let mut bridge = Rule::new("way").expect("valid subject");
    bridge.min_zoom = 13;
    bridge
        .conditions
        .push(Condition::new("true", "bridge").expect("valid condition"));
    bridge
        .conditions
        .push(Condition::new("eq", ["::class", "casing"]).expect("valid condition"));

    let mut water = Rule::new("area").expect("valid subject");
    water
        .conditions
        .push(Condition::new("regex", ["natural", "water|wetland"]).expect("valid condition"));

    for rule in [&primary, &bridge, &water] {
        println!("{rule}");
    }

    let index = RuleIndex::new(vec![primary, bridge, water]);
    println!("{index}");

    let tags = Tags::new()
        .set("highway", "primary")
        .set("bridge", "yes")
        .set("layer", "1");

    for zoom in [6, 10, 15] {
        let report = index.matching_detailed("line", &tags, zoom);
        println!("z{zoom}: {report}");
    }
}
