use super::*;
use crate::chord::chord_spans;
use crate::document::parse_document;
use pretty_assertions::assert_eq;

fn structured(text: &str) -> String {
    StructuredRenderer.render(&parse_document(text, false))
}

fn legacy(text: &str) -> String {
    LegacyRenderer.render(&parse_document(text, false))
}

fn body(html: &str) -> &str {
    let start = html.find("<div class=\"song-body\">").unwrap() + "<div class=\"song-body\">".len();
    let end = html.rfind("</div>\n</div>\n").unwrap();
    &html[start..end]
}

#[test]
fn test_structured_header() {
    let html = structured("{title: Amazing Grace}\n{st: Hymn}\n{capo: 2}\n{artist: John Newton}\n{key: G}");
    assert_eq!(
        html,
        "<div class=\"song\">\n\
         <h1 class=\"title\">Amazing Grace</h1>\n\
         <div class=\"subtitle\">Hymn</div>\n\
         <div class=\"meta\">Artist: John Newton · Key: G · Capo: 2</div>\n\
         <div class=\"song-body\"></div>\n\
         </div>\n"
    );
}

#[test]
fn test_structured_untitled_without_meta() {
    let html = structured("la la");
    assert!(html.contains("<h1 class=\"title\">Untitled</h1>"));
    assert!(!html.contains("class=\"meta\""));
    assert!(!html.contains("class=\"subtitle\""));
}

#[test]
fn test_structured_chord_line() {
    assert_eq!(
        body(&structured("[G]Amazing [C] grace [D]")),
        "<div class=\"line\"><span class=\"chord\">G</span>Amazing \
         <span class=\"chord\">C</span>&nbsp; grace \
         <span class=\"chord\">D</span>&nbsp;</div>"
    );
}

#[test]
fn test_structured_escapes_user_text() {
    let html = structured("{title: Rock & Roll}\n{c: <loud>}\n[A<b]x < y");
    assert!(html.contains("Rock &amp; Roll"));
    assert!(html.contains("<div class=\"comment\">&lt;loud&gt;</div>"));
    assert!(html.contains("<span class=\"chord\">A&lt;b</span>x &lt; y"));
}

#[test]
fn test_structured_sections_labels_and_spacers() {
    assert_eq!(
        body(&structured("Verse 1:\nla\n\n{sob}\nhey\n{eob}")),
        "<div class=\"section-label\">Verse 1</div>\
         <div class=\"line\">la</div>\
         <div class=\"spacer\"></div>\
         <div class=\"section bridge\"><div class=\"line\">hey</div></div>"
    );
}

#[test]
fn test_structured_extra_end_of_chorus_is_noop() {
    assert_eq!(
        body(&structured("{start_of_chorus}\nHello\n{end_of_chorus}\n{end_of_chorus}")),
        "<div class=\"section chorus\"><div class=\"line\">Hello</div></div>"
    );
}

#[test]
fn test_structured_closes_open_sections() {
    let html = structured("{soc}\n{sob}\nla");
    assert_eq!(
        body(&html),
        "<div class=\"section chorus\"><div class=\"section bridge\"><div class=\"line\">la</div></div></div>"
    );
    assert_eq!(html.matches("<div").count(), html.matches("</div>").count());
}

#[test]
fn test_structured_end_pops_top_section() {
    assert_eq!(
        body(&structured("{soc}\n{sob}\n{eoc}\nla")),
        "<div class=\"section chorus\"><div class=\"section bridge\"></div><div class=\"line\">la</div></div>"
    );
}

#[test]
fn test_structured_drops_unsupported_directives() {
    assert_eq!(body(&structured("{ci: soft}\n{sot}\n{tempo: 90}\nla")), "<div class=\"line\">la</div>");
}

#[test]
fn test_structured_page() {
    let doc = parse_document("{title: Hymn}", false);
    let fragment = StructuredRenderer.render(&doc);
    let page = StructuredRenderer.page(&doc, &fragment);
    assert!(page.starts_with("<!doctype html>"));
    assert!(page.contains("<title>Hymn</title>"));
    assert!(page.contains(&fragment));
}

#[test]
fn test_legacy_grid() {
    assert_eq!(
        legacy("[G]Amazing [C]grace"),
        "<TABLE cellpadding=\"0\" cellspacing=\"0\">\
         <TR><TD class=\"chords\"></TD><TD class=\"chords\">G</TD><TD class=\"chords\">C</TD></TR>\
         <TR><TD class=\"lyrics\"></TD><TD class=\"lyrics\">Amazing&nbsp;</TD><TD class=\"lyrics\">grace</TD></TR>\
         </TABLE>\n"
    );
}

#[test]
fn test_legacy_directives() {
    assert_eq!(
        legacy("{title: Hymn}\n{a: Newton}\n{st: Old}\n{c: Slowly}\n{ci: soft}\n{cb: boxed}"),
        "<H1> Hymn</H1>\n\
         <H2> Newton</H2>\n\
         <H2> Old</H2>\n\
         <P class=\"comment\"> Slowly</P>\n\
         <P class=\"comment_italic\"> soft</P>\n\
         <P class=\"comment_box\"> boxed</P>\n"
    );
}

#[test]
fn test_legacy_chorus_and_tab_classes() {
    let html = legacy("{soc}\nla\n{sot}\nE|--0--\n{eoc}\nB|--1--\n{eot}\nend");
    assert_eq!(
        html,
        "<DIV class=\"lyrics_chorus\">la</DIV>\n\
         <DIV class=\"lyrics_chorus_tab\">E|--0--</DIV>\n\
         <DIV class=\"lyrics_tab\">B|--1--</DIV>\n\
         <DIV class=\"lyrics\">end</DIV>\n"
    );
}

#[test]
fn test_legacy_labels_and_blanks_use_line_splitter() {
    assert_eq!(legacy("Chorus:\n\n"), "<DIV class=\"lyrics\">Chorus:</DIV>\n<BR>\n");
}

#[test]
fn test_legacy_double_end_of_chorus() {
    assert_eq!(
        legacy("{soc}\nHello\n{eoc}\n{eoc}\nBye"),
        "<DIV class=\"lyrics_chorus\">Hello</DIV>\n<DIV class=\"lyrics\">Bye</DIV>\n"
    );
}

#[test]
fn test_renderers_agree_on_chords() {
    let text = "[G]one [] two [Am7/E]three [XYZ]four [C";
    let expected: Vec<&str> = chord_spans(text).map(|span| span.body).collect();
    assert_eq!(expected, vec!["G", "Am7/E", "XYZ"]);

    let doc = parse_document(text, false);
    let a = StructuredRenderer.render(&doc);
    let a_chords: Vec<&str> = a
        .split("<span class=\"chord\">")
        .skip(1)
        .filter_map(|s| s.split("</span>").next())
        .collect();

    let b = LegacyRenderer.render(&doc);
    let b_chords: Vec<&str> = b
        .split("<TD class=\"chords\">")
        .skip(2)
        .filter_map(|s| s.split("</TD>").next())
        .collect();

    assert_eq!(a_chords, expected);
    assert_eq!(b_chords, expected);
}

#[test]
fn test_renderer_kind_dispatch() {
    let doc = parse_document("{title: Hymn}", false);
    assert_eq!(RendererKind::Structured.renderer().render(&doc), StructuredRenderer.render(&doc));
    assert_eq!(RendererKind::Legacy.renderer().render(&doc), "<H1> Hymn</H1>\n");
}
