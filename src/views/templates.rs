use handlebars::{Handlebars, TemplateError};
use std::sync::Arc;

pub type Hbs = Arc<Handlebars<'static>>;

const TEMPLATES: [(&str, &str); 8] = [
    ("layouts/base", "templates/layouts/base.hbs"),
    ("pages/not_found", "templates/pages/not_found.hbs"),
    ("pages/error", "templates/pages/error.hbs"),
    ("shop/product_list", "templates/shop/product_list.hbs"),
    ("shop/product_detail", "templates/shop/product_detail.hbs"),
    ("cart/detail", "templates/cart/detail.hbs"),
    ("orders/create", "templates/orders/create.hbs"),
    ("orders/created", "templates/orders/created.hbs"),
];

/// Loads every template from `templates/`, relative to the working directory.
pub fn build_handlebars() -> Result<Hbs, TemplateError> {
    let mut hb = Handlebars::new();

    for (name, path) in TEMPLATES {
        hb.register_template_file(name, path)?;
    }

    Ok(Arc::new(hb))
}
