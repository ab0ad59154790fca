//! Login page markup

use platform::flash::Flash;
use platform::html::page;

pub fn login_page(flash: Option<&Flash>) -> String {
    page(
        "Login",
        flash,
        r#"<h1>Login</h1>
<form method="post" action="/login">
<label>Username <input type="text" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Login</button>
</form>"#,
    )
}
