//! The customer-facing booking page, embedded in the binary.

use axum::response::Html;

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="de">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Termin buchen</title>
    <style>
        body { font-family: -apple-system, 'Segoe UI', Roboto, Arial, sans-serif; max-width: 640px; margin: 0 auto; padding: 20px; color: #1f2937; }
        h1 { font-size: 1.5rem; }
        label { display: block; margin-top: 12px; font-weight: 600; }
        input, select, textarea { width: 100%; padding: 8px; margin-top: 4px; box-sizing: border-box; }
        button { margin-top: 16px; padding: 10px 16px; background: #b45309; color: #fff; border: 0; border-radius: 4px; cursor: pointer; }
        .message { margin-top: 16px; padding: 12px; border-radius: 4px; word-break: break-all; }
        .ok { background: #dcfce7; }
        .error { background: #fee2e2; }
    </style>
</head>
<body>
    <h1>Termin buchen</h1>
    <form id="booking">
        <label for="day">Tag</label>
        <select id="day" required></select>

        <label for="slot">Uhrzeit</label>
        <select id="slot" required></select>

        <label for="type">Anliegen</label>
        <select id="type">
            <option value="goldankauf">Goldankauf</option>
            <option value="trauringe">Trauringe</option>
            <option value="verlobungsringe">Verlobungsringe</option>
            <option value="ohrlochstechen">Ohrlochstechen</option>
            <option value="sonstiges">Sonstiges</option>
        </select>

        <label for="name">Name</label>
        <input id="name" required>
        <label for="email">E-Mail</label>
        <input id="email" type="email" required>
        <label for="phone">Telefon</label>
        <input id="phone" required>
        <label for="desc">Beschreibung</label>
        <textarea id="desc" rows="3"></textarea>

        <button type="submit">Buchen</button>
    </form>
    <div id="message"></div>

    <script>
    const $ = (id) => document.getElementById(id);

    function show(text, ok) {
        $('message').className = 'message ' + (ok ? 'ok' : 'error');
        $('message').textContent = text;
    }

    async function loadDays() {
        const res = await fetch('/api/dates');
        const body = await res.json();
        $('day').innerHTML = '';
        for (const day of body.data || []) {
            $('day').add(new Option(day, day));
        }
        await loadSlots();
    }

    async function loadSlots() {
        $('slot').innerHTML = '';
        const day = $('day').value;
        if (!day) return;
        const res = await fetch('/api/termins?date=' + encodeURIComponent(day));
        const body = await res.json();
        if (!res.ok) {
            $('slot').add(new Option(body.error, ''));
            return;
        }
        for (const slot of body.data) {
            $('slot').add(new Option(slot.split(' ')[1], slot));
        }
    }

    $('day').addEventListener('change', loadSlots);
    $('booking').addEventListener('submit', async (event) => {
        event.preventDefault();
        const res = await fetch('/api/termins', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({
                name: $('name').value,
                email: $('email').value,
                phone: $('phone').value,
                desc: $('desc').value,
                type: $('type').value,
                date: $('slot').value,
            }),
        });
        const body = await res.json();
        if (res.ok) {
            show('Gebucht. Bitte bewahren Sie diese Angaben auf, der delkey wird zum Stornieren benötigt: ' + body.data, true);
            await loadSlots();
        } else {
            show(body.error, false);
        }
    });

    loadDays();
    </script>
</body>
</html>
"#;

/// GET /
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
