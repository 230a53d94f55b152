use crate::card::CopyIcon;
use crate::deck::{CardView, Frame, FrameBody};
use crate::pagination::ControlStrip;

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_card(card: &CardView) -> String {
    let revealed = card.revealed;
    format!(
        r#"      <div class="cheat-card rounded-2xl border border-slate-800 bg-slate-900 p-5 shadow-sm" data-slot="{slot}">
        <img src="{image}" alt="Game Image" class="cheat-img rounded-xl mb-4">
        <h2 class="cheat-title text-white text-xl mb-2">{title}</h2>
        <p class="cheat-description text-slate-400 text-sm mb-4">{body}</p>
        <button class="cheat-show-btn bg-primary text-white rounded-lg px-4 py-2 text-xs font-bold" type="button"{show_style}>Show Code</button>
        <div class="cheat-code-area items-center gap-3" style="display: {area};">
          <code class="font-mono text-emerald-400 font-bold">{code}</code>
          <button class="cheat-copy-btn" type="button" data-code="{code}"><span class="material-symbols-outlined">{icon}</span></button>
        </div>
      </div>
"#,
        slot = card.slot,
        image = escape_html(&card.image),
        title = escape_html(&card.title),
        body = escape_html(&card.body),
        show_style = if revealed { r#" style="display: none;""# } else { "" },
        area = if revealed { "flex" } else { "none" },
        code = escape_html(&card.code),
        icon = CopyIcon::Copy.symbol(),
    )
}

fn render_strip(strip: &ControlStrip) -> String {
    let mut out = String::new();
    for b in strip.buttons.iter() {
        let class = if b.active {
            "pagination-page active"
        } else if b.label.parse::<usize>().is_ok() {
            "pagination-page"
        } else {
            "pagination-btn"
        };
        out.push_str(&format!(
            r#"<button class="{class}" type="button"{disabled}>{label}</button>"#,
            disabled = if b.enabled { "" } else { " disabled" },
            label = escape_html(&b.label),
        ));
    }
    out
}

pub fn render_html(frame: &Frame, query: &str) -> Vec<u8> {
    let body = match &frame.body {
        FrameBody::Cards(cards) => cards.iter().map(render_card).collect::<String>(),
        FrameBody::Message(message) => format!(
            r#"      <p style="text-align: center; color: #ccc;">{}</p>
"#,
            escape_html(message)
        ),
        FrameBody::Loading => String::new(),
    };
    let range = match frame.summary.as_ref() {
        Some(s) => format!(
            "Showing {}-{} of {} &middot; page {}/{}",
            s.first, s.last, s.total, s.page, s.total_pages
        ),
        None => "Showing 0-0".to_string(),
    };

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en" class="dark">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Cheat Codes</title>
  <script src="https://cdn.tailwindcss.com?plugins=forms,container-queries"></script>
  <link href="https://fonts.googleapis.com/css2?family=Material+Symbols+Outlined:wght,FILL@100..700,0..1&amp;display=swap" rel="stylesheet"/>
  <script id="tailwind-config">
    tailwind.config = {{
      darkMode: "class",
      theme: {{ extend: {{ colors: {{ "primary": "#135bec" }} }} }}
    }};
  </script>
</head>
<body class="bg-slate-950 text-slate-100 min-h-screen">
  <main class="max-w-[1440px] mx-auto w-full px-8 py-10">
    <h1 class="text-white text-5xl mb-2">CHEAT CODES</h1>
    <p class="text-slate-400 text-base font-medium mb-8">Search: <span id="search-query">{query}</span> &middot; <span id="results-range">{range}</span></p>
    <div class="cheats-container grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-5">
{body}    </div>
    <div class="pagination-bar flex items-center gap-2 mt-8">{strip}</div>
  </main>
  <script>
    (function() {{
      for (const card of document.querySelectorAll('.cheat-card')) {{
        const showBtn = card.querySelector('.cheat-show-btn');
        const codeArea = card.querySelector('.cheat-code-area');
        const copyBtn = card.querySelector('.cheat-copy-btn');
        showBtn.addEventListener('click', function() {{
          codeArea.style.display = 'flex';
          showBtn.style.display = 'none';
        }});
        copyBtn.addEventListener('click', function() {{
          navigator.clipboard.writeText(copyBtn.getAttribute('data-code') || '')
            .then(function() {{
              copyBtn.innerHTML = '<span class="material-symbols-outlined">{confirmed}</span>';
              setTimeout(function() {{
                copyBtn.innerHTML = '<span class="material-symbols-outlined">{copy}</span>';
              }}, {confirm_ms});
            }})
            .catch(function(err) {{ console.error('Failed to copy:', err); }});
        }});
      }}
    }})();
  </script>
</body>
</html>
"####,
        query = escape_html(query.trim()),
        range = range,
        body = body,
        strip = render_strip(&frame.controls),
        confirmed = CopyIcon::Confirmed.symbol(),
        copy = CopyIcon::Copy.symbol(),
        confirm_ms = crate::card::COPY_CONFIRMATION.as_millis(),
    );

    html.into_bytes()
}
