//! HTML rendering for list pages.

use maud::{html, Markup, PreEscaped, DOCTYPE};
use todolist_core::ListPage;

const CSS: &str = r#"
body { background: #e4e9fd; font-family: helvetica, sans-serif; }
.box { max-width: 400px; margin: 40px auto; background: #fff; border-radius: 5px; box-shadow: 5px 5px 15px -5px rgba(0,0,0,.3); }
#heading { background: #a683e3; color: #fff; text-align: center; padding: 10px 0; }
.item { display: flex; align-items: center; min-height: 70px; border-bottom: 1px solid #f1f1f1; }
.item p { margin: 0; padding: 20px; font-size: 20px; font-weight: 200; color: #00204a; }
input[type="checkbox"] { margin: 20px; }
input[type="text"] { text-align: center; height: 60px; border: none; font-size: 20px; flex: 1; }
button { min-height: 50px; width: 50px; border-radius: 50%; border: none; margin: 10px; background: #a683e3; color: #fff; font-size: 30px; }
"#;

/// Renders one list with its header date, delete checkboxes and add form.
///
/// Each checkbox posts `removeItem` and `listName` to `/delete`; the add form
/// posts `newItem` with the list label as the submit button's `list` value.
pub fn list_page(page: &ListPage, date: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page.list_name) }
                style { (PreEscaped(CSS)) }
            }
            body {
                div.box #heading {
                    h1 { (page.list_name) }
                    p.date { (date) }
                }
                div.box {
                    @for item in &page.items {
                        form.item action="/delete" method="post" {
                            input type="checkbox" name="removeItem" value=(item.id.to_string()) onchange="this.form.submit()";
                            p { (item.name) }
                            input type="hidden" name="listName" value=(page.list_name);
                        }
                    }
                    form.item action="/" method="post" {
                        input type="text" name="newItem" placeholder="New Item" autocomplete="off";
                        button type="submit" name="list" value=(page.list_name) { "+" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::list_page;
    use todolist_core::{Item, ListPage};

    #[test]
    fn renders_header_items_and_forms() {
        let item = Item::new("Buy milk").expect("item name should be valid");
        let page = ListPage {
            list_name: "Work".to_string(),
            items: vec![item.clone()],
        };

        let html = list_page(&page, "Wednesday, 14 October").into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Work</h1>"));
        assert!(html.contains("Wednesday, 14 October"));
        assert!(html.contains(&format!(r#"name="removeItem" value="{}""#, item.id)));
        assert!(html.contains(r#"name="listName" value="Work""#));
        assert!(html.contains(r#"name="list" value="Work""#));
        assert!(html.contains("<p>Buy milk</p>"));
    }

    #[test]
    fn escapes_item_text() {
        let page = ListPage {
            list_name: "Work".to_string(),
            items: vec![Item::new("<script>alert(1)</script>").expect("item name should be valid")],
        };

        let html = list_page(&page, "today").into_string();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
