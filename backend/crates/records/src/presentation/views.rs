//! Record pages

use auth::{Identity, UserRole};
use platform::flash::Flash;
use platform::html::{escape, page};

use crate::domain::listing::Page;
use crate::domain::record::Record;
use crate::presentation::dto::RecordForm;

pub fn listing_page(
    records: &Page<Record>,
    search: Option<&str>,
    viewer: &Identity,
    flash: Option<&Flash>,
) -> String {
    let is_admin = viewer.user_role == UserRole::Admin;
    let search = search.unwrap_or_default();

    let mut body = format!(
        r#"<header><span>Signed in as {} ({})</span> <a href="/logout">Log out</a></header>
<h1>Student Records</h1>
<form method="get" action="/">
<input type="text" name="search" value="{}" placeholder="Search by name">
<button type="submit">Search</button>
</form>
"#,
        escape(viewer.user_name.as_str()),
        viewer.user_role,
        escape(search),
    );

    if is_admin {
        body.push_str("<p><a href=\"/add\">Add record</a></p>\n");
    }

    if records.items.is_empty() {
        body.push_str("<p>No records found.</p>\n");
    } else {
        body.push_str("<table>\n<thead><tr><th>Name</th><th>Age</th><th>Course</th>");
        if is_admin {
            body.push_str("<th>Actions</th>");
        }
        body.push_str("</tr></thead>\n<tbody>\n");
        for record in &records.items {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td>",
                escape(&record.name),
                escape(&record.age),
                escape(&record.course)
            ));
            if is_admin {
                body.push_str(&format!(
                    r#"<td><a href="/edit/{id}">Edit</a> <a href="/delete/{id}">Delete</a></td>"#,
                    id = record.id
                ));
            }
            body.push_str("</tr>\n");
        }
        body.push_str("</tbody>\n</table>\n");
    }

    body.push_str(&pagination(records, search));
    page("Records", flash, &body)
}

fn pagination(records: &Page<Record>, search: &str) -> String {
    let link = |target: u32| {
        if search.is_empty() {
            format!("/?page={target}")
        } else {
            format!("/?page={target}&amp;search={}", urlencoding::encode(search))
        }
    };

    let mut nav = String::from("<nav>");
    if records.has_prev() {
        nav.push_str(&format!(
            r#"<a href="{}">Previous</a> "#,
            link(records.page - 1)
        ));
    }
    nav.push_str(&format!(
        "<span>Page {} of {}</span>",
        records.page,
        records.total_pages().max(1)
    ));
    if records.has_next() {
        nav.push_str(&format!(r#" <a href="{}">Next</a>"#, link(records.page + 1)));
    }
    nav.push_str("</nav>\n");
    nav
}

/// Shared add/edit form; `action` is the POST target
pub fn record_form_page(
    title: &str,
    action: &str,
    values: &RecordForm,
    flash: Option<&Flash>,
) -> String {
    let body = format!(
        r#"<h1>{title}</h1>
<form method="post" action="{action}">
<label>Name <input type="text" name="name" value="{name}" required></label>
<label>Age <input type="text" name="age" value="{age}" required></label>
<label>Course <input type="text" name="course" value="{course}" required></label>
<button type="submit">Save</button>
</form>
<p><a href="/">Back to records</a></p>"#,
        title = escape(title),
        action = escape(action),
        name = escape(&values.name),
        age = escape(&values.age),
        course = escape(&values.course),
    );
    page(title, flash, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::UserName;
    use kernel::id::RecordId;

    fn identity(role: UserRole) -> Identity {
        Identity {
            user_name: UserName::new("someone").unwrap(),
            user_role: role,
        }
    }

    fn record(name: &str) -> Record {
        Record {
            id: RecordId::new(),
            name: name.to_string(),
            age: "20".to_string(),
            course: "Math".to_string(),
        }
    }

    fn one_page(items: Vec<Record>, total_count: u64, page: u32) -> Page<Record> {
        Page {
            items,
            total_count,
            page,
            page_size: 5,
        }
    }

    #[test]
    fn test_admin_sees_actions_viewer_does_not() {
        let records = one_page(vec![record("Alice")], 1, 1);
        let admin = listing_page(&records, None, &identity(UserRole::Admin), None);
        assert!(admin.contains("/add"));
        assert!(admin.contains("/edit/"));

        let viewer = listing_page(&records, None, &identity(UserRole::Viewer), None);
        assert!(!viewer.contains("/add"));
        assert!(!viewer.contains("/edit/"));
        assert!(viewer.contains("Alice"));
    }

    #[test]
    fn test_record_text_is_escaped() {
        let records = one_page(vec![record("<b>Eve</b>")], 1, 1);
        let html = listing_page(&records, None, &identity(UserRole::Viewer), None);
        assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(!html.contains("<b>Eve"));
    }

    #[test]
    fn test_pagination_links_keep_search() {
        let records = one_page(vec![record("Alice")], 11, 2);
        let html = listing_page(&records, Some("a b"), &identity(UserRole::Viewer), None);
        assert!(html.contains("Page 2 of 3"));
        assert!(html.contains("/?page=1&amp;search=a%20b"));
        assert!(html.contains("/?page=3&amp;search=a%20b"));
    }

    #[test]
    fn test_empty_listing() {
        let records = one_page(Vec::new(), 0, 1);
        let html = listing_page(&records, None, &identity(UserRole::Viewer), None);
        assert!(html.contains("No records found."));
        assert!(html.contains("Page 1 of 1"));
        assert!(!html.contains("Next"));
    }
}
