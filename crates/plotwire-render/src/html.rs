//! HTML embeddings of a chart document.
//!
//! The document's traces and layout go straight into a `Plotly.newPlot` call; `</` is escaped so
//! string values cannot close the surrounding `<script>`.

use plotwire_core::Document;
use std::fmt::Write as _;

pub const DEFAULT_TITLE: &str = "plotwire plot";

fn script_json(json: String) -> String {
    json.replace("</", "<\\/")
}

/// The element id as a JS string literal; the `<div>` attribute is escaped separately.
fn js_target(element_id: &str) -> serde_json::Result<String> {
    Ok(script_json(serde_json::to_string(element_id)?))
}

struct Payload {
    traces: String,
    layout: String,
}

impl Payload {
    fn new(doc: &Document<'_>) -> serde_json::Result<Self> {
        Ok(Self {
            traces: script_json(doc.traces_json()?),
            layout: script_json(doc.layout_json()?),
        })
    }
}

/// `<script src>` tag that loads the visualization library.
pub fn load_tag(library_src: &str) -> String {
    format!(
        "<script type=\"text/javascript\" src=\"{}\"></script>",
        htmlize::escape_attribute(library_src)
    )
}

/// A `<div>` filling its container plus the plot call, preceded by `load_tag` when given.
pub fn fragment(
    doc: &Document<'_>,
    element_id: &str,
    load_tag: Option<&str>,
) -> serde_json::Result<String> {
    let Payload { traces, layout } = Payload::new(doc)?;
    let id = htmlize::escape_attribute(element_id);
    let target = js_target(element_id)?;
    let mut out = String::new();
    if let Some(tag) = load_tag {
        out.push_str(tag);
        out.push('\n');
    }
    let _ = write!(
        out,
        "<div id=\"{id}\" style=\"width: 100%;height: 100%;\"></div>\n\
         <script type=\"text/javascript\">\n\
         \x20 Plotly.newPlot({target}, {traces}, {layout});\n\
         </script>\n"
    );
    Ok(out)
}

/// Fragment for notebook front-ends that load the library through requirejs.
pub fn notebook_fragment(doc: &Document<'_>, element_id: &str) -> serde_json::Result<String> {
    let Payload { traces, layout } = Payload::new(doc)?;
    let id = htmlize::escape_attribute(element_id);
    let target = js_target(element_id)?;
    Ok(format!(
        "<div id=\"{id}\" style=\"width: 100%; height:525px;\"></div>\n\
         <script type=\"text/javascript\">\n\
         \x20 requirejs([\"plotly\"], function (Plotly) {{\n\
         \x20   Plotly.newPlot({target}, {traces}, {layout});\n\
         \x20 }});\n\
         </script>\n"
    ))
}

/// A complete page with a single chart.
pub fn standalone(
    doc: &Document<'_>,
    title: &str,
    library_src: &str,
    element_id: &str,
) -> serde_json::Result<String> {
    let Payload { traces, layout } = Payload::new(doc)?;
    let id = htmlize::escape_attribute(element_id);
    let target = js_target(element_id)?;
    let title = htmlize::escape_text(title);
    let script = load_tag(library_src);
    Ok(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         {script}\n\
         </head>\n\
         <body>\n\
         <div id=\"{id}\" style=\"width: 100%; height:100%;\"></div>\n\
         <script type=\"text/javascript\">\n\
         Plotly.newPlot({target}, {traces}, {layout});\n\
         </script>\n\
         </body>\n\
         </html>\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotwire_core::{BarSpec, Figure};

    const SRC: &str = "https://cdn.plot.ly/plotly-latest.min.js";

    fn figure() -> Figure {
        let mut fig = Figure::new();
        let mut spec = BarSpec::new(vec![0.0], vec![1.0]);
        spec.label = Some("</script><b>".into());
        fig.bar(spec).unwrap();
        fig
    }

    #[test]
    fn fragment_embeds_the_document_once() {
        let fig = figure();
        let html = fragment(&fig.document(), "plotwire-1", None).unwrap();
        assert!(html.starts_with("<div id=\"plotwire-1\""));
        assert_eq!(html.matches("Plotly.newPlot(\"plotwire-1\"").count(), 1);
        assert!(html.contains("{\"showlegend\":false}"));
        assert!(!html.contains("<script type=\"text/javascript\" src="));
    }

    #[test]
    fn fragment_prepends_the_load_tag() {
        let fig = figure();
        let tag = load_tag(SRC);
        let html = fragment(&fig.document(), "plotwire-1", Some(&tag)).unwrap();
        assert!(html.starts_with(&format!("<script type=\"text/javascript\" src=\"{SRC}\">")));
    }

    #[test]
    fn trace_strings_cannot_close_the_script() {
        let fig = figure();
        let html = fragment(&fig.document(), "id", None).unwrap();
        assert_eq!(html.matches("</script>").count(), 1);
        assert!(html.contains(r#""name":"<\/script><b>""#));
    }

    #[test]
    fn quoted_ids_match_between_div_and_plot_call() {
        let fig = figure();
        let id = r#"a"b&c"#;
        for html in [
            fragment(&fig.document(), id, None).unwrap(),
            notebook_fragment(&fig.document(), id).unwrap(),
            standalone(&fig.document(), "t", SRC, id).unwrap(),
        ] {
            assert!(html.contains(r#"<div id="a&quot;b&amp;c""#));
            assert!(html.contains(r#"Plotly.newPlot("a\"b&c", "#));
        }
    }

    #[test]
    fn notebook_fragment_uses_requirejs() {
        let fig = figure();
        let html = notebook_fragment(&fig.document(), "nb").unwrap();
        assert!(html.contains("requirejs([\"plotly\"], function (Plotly) {"));
        assert!(html.contains("height:525px"));
    }

    #[test]
    fn standalone_page_has_title_and_one_library_tag() {
        let fig = figure();
        let html = standalone(&fig.document(), "A & B", SRC, "uuid-1").unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>A &amp; B</title>"));
        assert_eq!(html.matches("<script type=\"text/javascript\" src=").count(), 1);
        assert!(html.contains("<div id=\"uuid-1\""));
    }
}
