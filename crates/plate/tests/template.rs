//! Integration tests - parse, query, mutate, render
//!
//! Exercises the templating workflow end to end the way a server would use it.

use plate::dom::DomError;
use plate::{Config, NodeRef, Template, TemplateError};

fn tdata(name: &str) -> String {
    format!("{}/tests/tdata/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn render(template: &Template) -> String {
    let mut out = Vec::new();
    template.render(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// ============================================================================
// PARSE / RENDER
// ============================================================================

#[test]
fn test_parse_render_round_trip() {
    let html = "<html><head></head><body><div>foo</div></body></html>";
    let template = Template::parse(html).unwrap();
    assert_eq!(render(&template), html);
    assert_eq!(template.to_html(), html);
}

#[test]
fn test_from_file() {
    let template = Template::from_file(tdata("t.html")).unwrap();
    let compact: String = render(&template)
        .chars()
        .filter(|c| *c != '\n' && *c != ' ')
        .collect();
    assert_eq!(compact, "<html><head></head><body><div>foo</div></body></html>");
}

#[test]
fn test_from_missing_file_is_io_error() {
    let err = Template::from_file(tdata("does-not-exist.html")).unwrap_err();
    assert!(matches!(err, TemplateError::Io(_)), "got {err:?}");
}

#[test]
fn test_from_reader() {
    let html = "<html><head></head><body><p>r</p></body></html>";
    let template = Template::from_reader(html.as_bytes()).unwrap();
    assert_eq!(template.to_html(), html);
}

#[test]
fn test_strict_config_rejects_malformed() {
    let config = Config {
        strict_parsing: true,
        ..Config::default()
    };
    let err = Template::parse_with_config("<p>unclosed <b>bold</p>", config).unwrap_err();
    assert!(matches!(err, TemplateError::Parse(_)), "got {err:?}");
}

#[test]
fn test_pretty_print_config() {
    let config = Config {
        pretty_print: true,
        ..Config::default()
    };
    let template =
        Template::parse_with_config("<html><head></head><body><div>foo</div></body></html>", config)
            .unwrap();
    let out = template.to_html();
    assert!(out.contains("\n  <head>"), "{out}");
    assert!(out.contains("<div>foo</div>"), "{out}");
}

// ============================================================================
// QUERIES
// ============================================================================

#[test]
fn test_find_first() {
    let template =
        Template::parse("<html><head></head><body><div id=foo>foop</div></body></html>").unwrap();
    let el = template.find_first("#foo").unwrap();
    assert!(el.is_some(), "Can't find id in template");
    assert_eq!(template.tag_name(el.unwrap()), Some("div"));

    let missing = template.find_first("#bar").unwrap();
    assert!(missing.is_none(), "found id not in template");
}

#[test]
fn test_find() {
    let template = Template::parse(
        "<html><head></head><body><div id=foo>foop</div><span class='chi'>one</span><span class='chi'>two</span></body></html>",
    )
    .unwrap();

    assert_eq!(template.find("#foo").unwrap().len(), 1);
    assert_eq!(template.find("#bar").unwrap().len(), 0);

    let chi = template.find(".chi").unwrap();
    assert_eq!(chi.len(), 2);
    let first_text = template.first_child(chi.get(0).unwrap()).unwrap();
    let second_text = template.first_child(chi.get(1).unwrap()).unwrap();
    assert_eq!(template.text(first_text), Some("one"));
    assert_eq!(template.text(second_text), Some("two"));
}

#[test]
fn test_find_scoped_to_node() {
    let mut template = Template::parse(
        "<div id=a><span class=x>in a</span></div><div id=b><span class=x>in b</span></div>",
    )
    .unwrap();
    let b = template.find_first("#b").unwrap().unwrap();

    let scoped = template.find_in(b, ".x").unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(template.text_content(scoped.get(0).unwrap()), "in b");

    let node = template.node_mut(b).unwrap();
    let first = node.find_first("span").unwrap().unwrap();
    assert_eq!(template.text_content(first), "in b");
}

#[test]
fn test_selector_error_surfaces() {
    let template = Template::parse("<p>x</p>").unwrap();
    let err = template.find("p:hover").unwrap_err();
    assert!(matches!(err, TemplateError::Selector(_)), "got {err:?}");
}

#[test]
fn test_navigation() {
    let template = Template::parse("<ul><li id=a>1</li><li id=b>2</li><li id=c>3</li></ul>").unwrap();
    let b = template.find_first("#b").unwrap().unwrap();
    let ul = template.parent(b).unwrap();

    assert_eq!(template.tag_name(ul), Some("ul"));
    assert_eq!(template.children(ul).len(), 3);
    assert_eq!(template.prev_sibling(b), template.find_first("#a").unwrap());
    assert_eq!(template.next_sibling(b), template.find_first("#c").unwrap());
    assert_eq!(template.first_child(ul), template.find_first("#a").unwrap());
    assert_eq!(template.last_child(ul), template.find_first("#c").unwrap());
    assert_eq!(template.attr(b, "id"), Some("b"));
    assert!(template.is_attached(b));
}

// ============================================================================
// CONTENT MUTATION
// ============================================================================

#[test]
fn test_replace_text() {
    let mut template =
        Template::parse("<html><head></head><body><div id=foo>foop</div></body></html>").unwrap();
    let el = template.find_first("#foo").unwrap().unwrap();
    template.replace_content_text(el, "bar").unwrap();

    let out = render(&template);
    assert!(out.contains("bar"), "Can't find replaced text in `{out}`");
    assert!(!out.contains("foop"), "Replaced text still in `{out}`");
}

#[test]
fn test_replace_text_is_escaped_on_render() {
    let mut template = Template::parse("<title id=title>x</title>").unwrap();
    let title = template.find_first("#title").unwrap().unwrap();
    template.replace_content_text(title, "Billy & Jane <3").unwrap();

    assert_eq!(template.text_content(title), "Billy & Jane <3");
    assert_eq!(
        template.node_html(title).unwrap(),
        r#"<title id="title">Billy &amp; Jane &lt;3</title>"#
    );
}

#[test]
fn test_set_replace_text() {
    let mut template =
        Template::parse("<p class=name>a</p><div><span class=name>b</span></div>").unwrap();
    let names = template.find(".name").unwrap();
    names.replace_content_text(&mut template, "tom").unwrap();

    for node in &names {
        assert_eq!(template.text_content(node), "tom");
    }
}

#[test]
fn test_replace_content_moves_attached_node() {
    let mut template =
        Template::parse("<div id=src><em id=mover>hi</em></div><div id=dst>old</div>").unwrap();
    let mover = template.find_first("#mover").unwrap().unwrap();
    let src = template.find_first("#src").unwrap().unwrap();
    let dst = template.find_first("#dst").unwrap().unwrap();

    template.replace_content(dst, mover).unwrap();

    assert_eq!(template.parent(mover), Some(dst));
    assert!(template.children(src).is_empty());
    assert_eq!(template.node_html(dst).unwrap(), r#"<div id="dst"><em id="mover">hi</em></div>"#);

    // Reusing the same handle moves it again instead of sharing it
    template.replace_content(src, mover).unwrap();
    assert_eq!(template.parent(mover), Some(src));
    assert!(template.children(dst).is_empty());
}

#[test]
fn test_replace_content_with_own_descendant() {
    let mut template = Template::parse("<div id=t><p><b id=keep>k</b></p><i>drop</i></div>").unwrap();
    let target = template.find_first("#t").unwrap().unwrap();
    let keep = template.find_first("#keep").unwrap().unwrap();

    template.replace_content(target, keep).unwrap();
    assert_eq!(template.node_html(target).unwrap(), r#"<div id="t"><b id="keep">k</b></div>"#);
}

#[test]
fn test_replace_content_with_fresh_element() {
    let mut template = Template::parse("<div id=t>old</div>").unwrap();
    let target = template.find_first("#t").unwrap().unwrap();
    let strong = template.create_element("strong");
    template.replace_content_text(strong, "new").unwrap();

    template.replace_content(target, strong).unwrap();
    assert_eq!(template.node_html(target).unwrap(), r#"<div id="t"><strong>new</strong></div>"#);
}

// ============================================================================
// CLONING
// ============================================================================

#[test]
fn test_copy_is_independent() {
    let mut template = Template::parse("<div id=orig class=box><p>keep me</p></div>").unwrap();
    let orig = template.find_first("#orig").unwrap().unwrap();
    let before = template.node_html(orig).unwrap();

    let copy = template.copy(orig).unwrap();
    assert!(template.parent(copy).is_none());
    assert_eq!(template.node_html(copy).unwrap(), before);

    template.replace_content_text(copy, "changed").unwrap();
    assert_eq!(template.node_html(orig).unwrap(), before);
    assert_eq!(template.text_content(copy), "changed");

    template.replace_content_text(orig, "also changed").unwrap();
    assert_eq!(template.text_content(copy), "changed");
}

// ============================================================================
// REPEAT
// ============================================================================

#[test]
fn test_repeat_node() {
    let mut template =
        Template::parse("<html><head></head><body><div class='person'>foop</div></body></html>")
            .unwrap();

    let people = ["Tom", "Richard", "Harry"];
    if let Some(person) = template.find_first(".person").unwrap() {
        template
            .repeat_node(person, people, |node, name| node.replace_content_text(name))
            .unwrap();
    }

    let results = template.find(".person").unwrap();
    assert_eq!(results.len(), 3);
    for (i, name) in people.iter().enumerate() {
        let text = template.first_child(results.get(i).unwrap()).unwrap();
        assert_eq!(template.text(text), Some(*name));
    }
    assert!(!render(&template).contains("foop"));
}

#[test]
fn test_repeat_empty_removes_placeholder() {
    let mut template = Template::parse("<ul><li class=person>foop</li></ul>").unwrap();
    let person = template.find_first(".person").unwrap().unwrap();

    template
        .repeat_node(person, Vec::<String>::new(), |node, name| node.replace_content_text(name))
        .unwrap();

    assert!(template.find(".person").unwrap().is_empty());
    assert!(!template.is_alive(person));
    assert!(template.find_first("ul").unwrap().is_some());
}

#[derive(Debug)]
struct Person {
    first: &'static str,
    last: &'static str,
}

#[test]
fn test_repeat_typed_records_from_file() {
    let mut template = Template::from_file_with_config(
        tdata("people.html"),
        Config {
            drop_whitespace_text: true,
            ..Config::default()
        },
    )
    .unwrap();

    let people = vec![
        Person { first: "Ada", last: "Lovelace" },
        Person { first: "Alan", last: "Turing" },
    ];
    let row = template.find_first("tr.person").unwrap().unwrap();
    template
        .repeat_node(row, &people, |node, person| {
            let first = node.find_first(".first")?.unwrap_or(node.node());
            node.template_mut().replace_content_text(first, person.first)?;
            let last = node.find_first(".last")?.unwrap_or(node.node());
            node.template_mut().replace_content_text(last, person.last)
        })
        .unwrap();

    let rows = template.find("tbody > tr").unwrap();
    assert_eq!(rows.len(), 2);
    let text: Vec<String> = rows.iter().map(|r| template.text_content(r)).collect();
    assert_eq!(text, vec!["AdaLovelace", "AlanTuring"]);
}

#[test]
fn test_repeat_nested() {
    let mut template = Template::parse(
        "<div class=group><h2>g</h2><ul><li class=item>i</li></ul></div>",
    )
    .unwrap();
    let groups = [("fruit", vec!["apple", "pear"]), ("veg", vec!["leek"])];

    let group = template.find_first(".group").unwrap().unwrap();
    template
        .repeat_node(group, &groups, |node, (name, items)| {
            let heading = node.find_first("h2")?.unwrap_or(node.node());
            node.template_mut().replace_content_text(heading, name)?;
            if let Some(item) = node.find_first(".item")? {
                node.template_mut()
                    .repeat_node(item, items, |li, item| li.replace_content_text(item))?;
            }
            Ok(())
        })
        .unwrap();

    let body = template.find_first("body").unwrap().unwrap();
    assert_eq!(
        template.node_html(body).unwrap(),
        concat!(
            "<body>",
            r#"<div class="group"><h2>fruit</h2><ul><li class="item">apple</li><li class="item">pear</li></ul></div>"#,
            r#"<div class="group"><h2>veg</h2><ul><li class="item">leek</li></ul></div>"#,
            "</body>"
        )
    );
}

#[test]
fn test_repeat_on_stale_node_is_error() {
    let mut template = Template::parse("<ul><li class=p>x</li></ul>").unwrap();
    let p = template.find_first(".p").unwrap().unwrap();
    template.repeat_node(p, ["a"], |n, s| n.replace_content_text(s)).unwrap();

    let err = template
        .repeat_node(p, ["b"], |n, s| n.replace_content_text(s))
        .unwrap_err();
    assert!(matches!(err, TemplateError::Dom(DomError::StaleNode(_))), "got {err:?}");
}

#[test]
fn test_for_each_mut() {
    let mut template = Template::parse("<b>1</b><b>2</b>").unwrap();
    let set = template.find("b").unwrap();
    set.for_each_mut(&mut template, |node| {
        let doubled = node.text_content().repeat(2);
        node.replace_content_text(doubled)
    })
    .unwrap();

    let texts: Vec<String> = set.iter().map(|n: NodeRef| template.text_content(n)).collect();
    assert_eq!(texts, vec!["11", "22"]);
}

#[test]
fn test_set_replace_over_nested_matches() {
    let mut template = Template::parse(r#"<div class="a">x<div class="a">y</div></div>"#).unwrap();
    let set = template.find(".a").unwrap();
    assert_eq!(set.len(), 2);

    set.replace_content_text(&mut template, "new").unwrap();
    assert_eq!(
        template.to_html(),
        r#"<html><head></head><body><div class="a">new</div></body></html>"#
    );
}

#[test]
fn test_extreme_nth_never_panics() {
    let template = Template::parse("<ul><li>1</li><li>2</li><li>3</li></ul>").unwrap();
    for pattern in [
        "li:nth-child(n-2147483648)",
        "li:nth-child(-n-2147483648)",
        "li:nth-last-child(-2147483648n+2147483647)",
        "li:nth-of-type(2147483647n-2147483648)",
    ] {
        match template.find(pattern) {
            Ok(set) => assert!(set.len() <= 3, "{pattern}"),
            Err(err) => assert!(matches!(err, TemplateError::Selector(_)), "{pattern}: {err:?}"),
        }
    }
}

// ============================================================================
// DEEP DOCUMENTS
// ============================================================================

const DEEP: usize = 100_000;

#[test]
fn test_deeply_nested_template_round_trip() {
    let nested = format!("{}<b>x</b>{}", "<span>".repeat(DEEP), "</span>".repeat(DEEP));
    let mut template = Template::parse(&nested).unwrap();

    let b = template.find_first("b").unwrap().unwrap();
    template.replace_content_text(b, "y").unwrap();

    let expected = nested.replace("<b>x</b>", "<b>y</b>");
    assert_eq!(
        template.to_html(),
        format!("<html><head></head><body>{expected}</body></html>")
    );
}

#[test]
fn test_deeply_built_content_renders() {
    let mut template = Template::parse("<div id=host></div>").unwrap();
    let host = template.find_first("#host").unwrap().unwrap();

    // Wrap from the inside out so each step only touches fresh nodes
    let mut top = template.create_text("x");
    for _ in 0..DEEP {
        let span = template.create_element("span");
        template.replace_content(span, top).unwrap();
        top = span;
    }
    template.replace_content(host, top).unwrap();

    let html = template.node_html(host).unwrap();
    assert_eq!(
        html,
        format!(r#"<div id="host">{}x{}</div>"#, "<span>".repeat(DEEP), "</span>".repeat(DEEP))
    );

    let mut out = Vec::new();
    template.render(&mut out).unwrap();
    assert_eq!(out.len(), template.to_html().len());

    // Dropping the whole chain frees every node
    let before = template.tree().len();
    template.replace_content_text(host, "").unwrap();
    assert_eq!(template.tree().len(), before - DEEP);
}
