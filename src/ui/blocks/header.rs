use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Title line followed by `Label: value` rows, values aligned
#[derive(Debug, Clone)]
pub struct CommandHeader {
    icon: Icon,
    title: String,
    items: Vec<(String, String)>,
}

impl CommandHeader {
    pub fn new(icon: Icon, title: impl Into<String>) -> Self {
        Self {
            icon,
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.items.push((label.into(), value.into()));
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut out = String::new();
        let title = ColoredText::info(self.title.as_str())
            .bold()
            .render(supports_color);
        out.push_str(&format!(
            "{} {}\n",
            self.icon.colored(supports_color, supports_unicode),
            title
        ));
        let width = self
            .items
            .iter()
            .map(|(label, _)| label.chars().count() + 1)
            .max()
            .unwrap_or(0);
        for (label, value) in &self.items {
            let label = format!("{:<width$}", format!("{}:", label), width = width);
            out.push_str(&format!(
                "  {} {}\n",
                ColoredText::dim(label).render(supports_color),
                value
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_ascii_icon_when_unicode_unsupported() {
        let mut header = CommandHeader::new(Icon::Deploy, "docpub deploy");
        header.add("Branch", "main -> gh-pages");

        let rendered = header.render(false, false);
        assert!(rendered.contains("[DEPLOY] docpub deploy"));
        assert!(rendered.contains("Branch: main -> gh-pages"));
    }

    #[test]
    fn aligns_values_to_longest_label() {
        let mut header = CommandHeader::new(Icon::Check, "docpub check");
        header.add("Docs", "/repo/docs");
        header.add("Publish to", "/repo");

        let rendered = header.render(false, false);
        assert!(rendered.contains("  Docs:       /repo/docs\n"));
        assert!(rendered.contains("  Publish to: /repo\n"));
    }
}
