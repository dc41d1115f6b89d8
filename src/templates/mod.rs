// Template system for prompt generation

pub mod builtin;

use anyhow::{anyhow, Result};
use tera::{Context, Tera};

/// Render a built-in template with the given context
pub fn render_builtin(name: &str, context: &Context) -> Result<String> {
    let source =
        builtin::get_builtin_template(name).ok_or_else(|| anyhow!("Unknown template: {}", name))?;

    // Names carry no .html suffix, so Tera leaves the text unescaped
    let mut tera = Tera::default();
    tera.add_raw_template(name, source)
        .map_err(|e| anyhow!("Failed to parse template '{}': {}", name, e))?;

    tera.render(name, context)
        .map_err(|e| anyhow!("Failed to render template '{}': {}", name, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_local_pros() {
        let mut context = Context::new();
        context.insert("category", "Architects and Interior Designers");
        context.insert("city", "Lahore");

        let prompt = render_builtin(builtin::LOCAL_PROS, &context).unwrap();
        assert!(prompt.starts_with(
            "Find top rated, real-world Architects and Interior Designers in Lahore, Pakistan."
        ));
        assert!(prompt.contains("List 5 specific businesses"));
    }

    #[test]
    fn test_no_html_escaping() {
        let mut context = Context::new();
        context.insert("category", "Suppliers (Cement & Steel)");
        context.insert("city", "D.I. Khan");

        let prompt = render_builtin(builtin::LOCAL_PROS, &context).unwrap();
        assert!(prompt.contains("Suppliers (Cement & Steel)"));
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        let context = Context::new();
        assert!(render_builtin(builtin::LOCAL_PROS, &context).is_err());
    }

    #[test]
    fn test_unknown_template() {
        assert!(render_builtin("nope", &Context::new()).is_err());
    }
}
