use crate::vdom::{RenderedPage, VNode};
use pagecraft_model::to_inline_css;

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Wrap in `<!DOCTYPE html>`, `<head>` and `<body>`
    pub full_document: bool,
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    pub title: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            full_document: true,
            pretty: true,
            indent: "  ".to_string(),
            title: "Untitled Page".to_string(),
        }
    }
}

impl HtmlOptions {
    /// Just the page nodes (and their style block), no document shell
    pub fn fragment() -> Self {
        Self {
            full_document: false,
            ..Self::default()
        }
    }
}

struct Context {
    options: HtmlOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.newline();
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize a rendered page to HTML
pub fn to_html(page: &RenderedPage, options: HtmlOptions) -> String {
    let mut ctx = Context::new(options);

    if !ctx.options.full_document {
        write_style_block(page, &mut ctx);
        for node in &page.nodes {
            write_node(node, &mut ctx);
        }
        return ctx.get_output();
    }

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    let title = format!("<title>{}</title>", escape_html(&ctx.options.title));
    ctx.add_line(&title);
    write_style_block(page, &mut ctx);
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body>");
    ctx.indent();
    for node in &page.nodes {
        write_node(node, &mut ctx);
    }
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

fn write_style_block(page: &RenderedPage, ctx: &mut Context) {
    if page.keyframes.is_empty() && page.rules.is_empty() {
        return;
    }

    ctx.add_line("<style>");
    ctx.indent();
    for keyframes in &page.keyframes {
        ctx.add_line(&guard_style_text(&format!(
            "@keyframes {} {{ from {{ {} }} to {{ opacity: 1; transform: none }} }}",
            keyframes.name, keyframes.from
        )));
    }
    for rule in &page.rules {
        ctx.add_line(&guard_style_text(&format!(
            "{} {{ {} }}",
            rule.selector,
            to_inline_css(&rule.properties)
        )));
    }
    ctx.dedent();
    ctx.add_line("</style>");
}

/// Keep CSS text from closing the enclosing `<style>` element
pub(crate) fn guard_style_text(css: &str) -> String {
    css.replace("</", "<\\/")
}

fn write_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            ..
        } => {
            if ctx.options.pretty {
                ctx.add_indent();
            }
            ctx.add(&format!("<{}", tag));

            for (name, value) in attributes {
                ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
            }
            if !styles.is_empty() {
                ctx.add(&format!(" style=\"{}\"", escape_html(&to_inline_css(styles))));
            }

            if children.is_empty() && is_self_closing(tag) {
                ctx.add(" />");
                ctx.newline();
                return;
            }

            ctx.add(">");

            let block = has_element_children(children);
            if block {
                ctx.newline();
                ctx.indent();
                for child in children {
                    write_node(child, ctx);
                }
                ctx.dedent();
                if ctx.options.pretty {
                    ctx.add_indent();
                }
            } else {
                for child in children {
                    write_inline(child, ctx);
                }
            }

            ctx.add(&format!("</{}>", tag));
            ctx.newline();
        }
        VNode::Text { .. } | VNode::Comment { .. } => {
            if ctx.options.pretty {
                ctx.add_indent();
            }
            write_inline(node, ctx);
            ctx.newline();
        }
    }
}

fn write_inline(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Text { content } => ctx.add(&escape_html(content)),
        VNode::Comment { content } => ctx.add(&format!("<!-- {} -->", content.replace("--", "- -"))),
        VNode::Element { .. } => write_node(node, ctx),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "input" | "br" | "hr" | "meta" | "link" | "source" | "track" | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children.iter().any(|child| matches!(child, VNode::Element { .. }))
}
