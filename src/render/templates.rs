//! Built-in template sources.
//!
//! Escaped interpolation is `{{ value }}`; the layout's `content` slot is
//! the one raw interpolation (`| safe`), carrying already-rendered HTML.

const BASE: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width,initial-scale=1">
    <title>{{ title }}</title>
    <link rel="stylesheet" href="/styles.css">
  </head>
  <body>
    <div class="container">
      {% include "components/nav.html" %}
      <main>
        {{ content | safe }}
      </main>
      <div class="footer badge">{{ app_name }} &bull; Minimal Edge Stack</div>
    </div>
  </body>
</html>
"#;

const NAV: &str = r#"<nav class="nav">
  {% if nav %}
    {% for item in nav %}
      <a href="{{ item.path }}" class="{% if active == item.id %}active{% endif %}">{{ item.label }}</a>
    {% endfor %}
  {% else %}
    <a href="/home" class="{% if active == 'home' %}active{% endif %}">Home</a>
  {% endif %}
  <span style="margin-left:auto" class="badge">{{ app_name }}</span>
</nav>
"#;

const HOME: &str = r#"<h1>Welcome to {{ app_name }}</h1>
<div class="grid grid-2">
  <section class="card">
    <h2>{{ schema.summary.title }}</h2>
    <p>{{ schema.summary.description }}</p>
  </section>
  <section class="card">
    <h3>Quick Links</h3>
    <ul>
      {% for s in schema.app.navigation.sidebar %}
        <li><a href="{{ s.path }}">{{ s.label }}</a></li>
      {% endfor %}
    </ul>
  </section>
</div>

<section class="card" style="margin-top:1rem">
  <h3>Cores</h3>
  <div class="grid grid-2">
  {% for c in schema.summary.cores %}
    <div class="card">
      <strong>{{ c.name }}</strong>
      <p class="badge">{{ c.description }}</p>
    </div>
  {% endfor %}
  </div>
</section>
"#;

const HEALTH: &str = r#"<h1>OK</h1>
<p class="badge">Time: {{ now }}</p>
<table>
  <tr><th>SQL</th><td>{{ db }}</td></tr>
  <tr><th>KV</th><td>{{ kv }}</td></tr>
  <tr><th>Blob</th><td>{{ blob }}</td></tr>
</table>
"#;

// Generic placeholder used by every admin section screen.
const STUB: &str = r#"<h1>{{ title }}</h1>
<p class="badge">Stub page: <code>{{ path }}</code>. Replace with real content.</p>
<ul>
  <li>POST to this path will validate a CSRF token.</li>
  <li>Sessions are carried by the {{ app_name }} session cookie.</li>
</ul>
"#;

/// Name → source table registered into the renderer at startup.
pub const BUILTIN: &[(&str, &str)] = &[
    ("layouts/base.html", BASE),
    ("components/nav.html", NAV),
    ("pages/home.html", HOME),
    ("pages/health.html", HEALTH),
    ("pages/stub.html", STUB),
];
