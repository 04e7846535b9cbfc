//! HTML dashboard generation
//!
//! Generates a self-contained HTML dashboard with embedded CSS and
//! JavaScript. The exported file is interactive (year selection, what-if
//! simulation, theme toggle, hover tooltips, click-to-detail modal) and
//! works offline: the dataset is embedded as JSON and the scripts mirror
//! the controller's arithmetic.

use crate::controller::ViewState;
use crate::dataset::{level_label, Dataset, Dimension};
use crate::simulation::SimulationParams;
use crate::theme::{Theme, COLOR_SCALE};
use serde_json::json;

/// Render the dashboard as a single HTML document.
pub fn render_html(dataset: &Dataset, state: &ViewState, params: &SimulationParams) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>GenAI Security Maturity Explorer</title>
    <style>{css}</style>
</head>
<body class="{theme}">
    <script>window.__gmData = {data};</script>
    <div class="container">
        {header}
        <div class="layout">
            {sidebar}
            <main>
                <section class="card">
                    <h2>Maturity Assessment Heatmap</h2>
                    <p class="hint">Hover cells for evidence; click a threat category for detailed analysis.</p>
                    <div id="heatmap"></div>
                </section>
                <div class="chart-row">
                    <section class="card">
                        <h2>Protection Gap Analysis</h2>
                        <p class="hint">Threat maturity minus the best protective dimension.</p>
                        <canvas id="gap-chart" height="240"></canvas>
                    </section>
                    <section class="card">
                        <h2>Threat Profile</h2>
                        <select id="radar-select" aria-label="Radar category"></select>
                        <canvas id="radar-chart" height="240"></canvas>
                    </section>
                </div>
            </main>
        </div>
        {modal}
        {footer}
    </div>
    <div id="tooltip" class="tooltip" hidden></div>
    <script>{js}</script>
</body>
</html>"#,
        css = inline_css(),
        theme = state.theme.as_str(),
        data = render_embed_json(dataset, state, params),
        header = render_header(),
        sidebar = render_sidebar(dataset, state),
        modal = render_modal_shell(),
        footer = render_footer(),
        js = inline_javascript(),
    )
}

/// Serialize the dataset and initial state into the embedded JSON blob.
fn render_embed_json(dataset: &Dataset, state: &ViewState, params: &SimulationParams) -> String {
    let records: Vec<serde_json::Value> = dataset
        .years()
        .iter()
        .flat_map(|year| dataset.records_for_year(*year))
        .map(|record| {
            let notes: Vec<Option<&str>> = Dimension::ALL
                .iter()
                .map(|dimension| {
                    record
                        .notes
                        .as_ref()
                        .and_then(|notes| notes.for_dimension(*dimension))
                })
                .collect();
            json!({
                "category": record.category,
                "year": record.year,
                "levels": [
                    record.threat_level,
                    record.technical_controls_level,
                    record.governance_level,
                    record.stakeholder_protection_level,
                ],
                "evidence": record.evidence,
                "notes": notes,
            })
        })
        .collect();

    let profiles: Vec<serde_json::Value> = dataset
        .categories()
        .iter()
        .filter_map(|category| dataset.profile(category))
        .map(|profile| {
            json!({
                "category": profile.category,
                "description": profile.description,
                "incidents": profile.incidents,
                "quote": profile.quote,
                "references": profile.references,
            })
        })
        .collect();

    let embed = json!({
        "years": dataset.years(),
        "categories": dataset.categories(),
        "dimensions": Dimension::ALL.iter().map(|d| d.label()).collect::<Vec<_>>(),
        "level_labels": (0u8..=4).map(level_label).collect::<Vec<_>>(),
        "color_scale": COLOR_SCALE,
        "delta": params.delta,
        "palettes": {
            "dark": Theme::Dark.palette(),
            "light": Theme::Light.palette(),
        },
        "records": records,
        "profiles": profiles,
        "initial": {
            "year": state.selected_year,
            "simulated": state.simulation_enabled,
            "theme": state.theme.as_str(),
            "selected": state.selected_category,
        },
    });
    embed.to_string()
}

fn render_header() -> &'static str {
    r#"<header>
            <h1>Generative AI Security Maturity Explorer</h1>
            <p class="meta">A sociotechnical maturity assessment of threat sophistication versus protective mechanisms</p>
        </header>"#
}

fn render_sidebar(dataset: &Dataset, state: &ViewState) -> String {
    let year_options: String = dataset
        .years()
        .iter()
        .map(|year| {
            let selected = if *year == state.selected_year {
                " selected"
            } else {
                ""
            };
            let kind = if *year == dataset.baseline_year() {
                "Baseline"
            } else {
                "Projection"
            };
            format!(r#"<option value="{year}"{selected}>{year} {kind}</option>"#)
        })
        .collect();

    let sim_checked = if state.simulation_enabled {
        " checked"
    } else {
        ""
    };
    let dark_checked = if state.theme == Theme::Dark {
        " checked"
    } else {
        ""
    };

    format!(
        r#"<aside class="card sidebar">
                <h2>Controls</h2>
                <label class="control-label" for="year-select">Assessment year</label>
                <select id="year-select">{year_options}</select>
                <label class="control toggle"><input type="checkbox" id="sim-toggle"{sim_checked}> What-if: improved governance</label>
                <label class="control toggle"><input type="checkbox" id="theme-toggle"{dark_checked}> Dark mode</label>
                <h2>Quick Statistics</h2>
                <div id="stats"></div>
            </aside>"#
    )
}

fn render_modal_shell() -> &'static str {
    r#"<div id="modal-backdrop" class="modal-backdrop" hidden>
            <div class="modal" role="dialog" aria-modal="true">
                <div class="modal-head">
                    <h2 id="modal-title"></h2>
                    <button id="modal-close" type="button">&times;</button>
                </div>
                <div id="modal-body" class="modal-body"></div>
            </div>
        </div>"#
}

fn render_footer() -> &'static str {
    r#"<footer>
            <p>Maturity scale: 0 = Non-existent, 1 = Initial/Ad-hoc, 2 = Developing, 3 = Defined, 4 = Managed/Mature</p>
        </footer>"#
}

/// Inline CSS styles
fn inline_css() -> &'static str {
    r#"
/* Reset & Base */
* {
    box-sizing: border-box;
    margin: 0;
    padding: 0;
}

body {
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    line-height: 1.6;
    color: var(--text);
    background: var(--bg);
}

body.dark {
    --bg: #1a1a2e;
    --surface: #16213e;
    --text: #ffffff;
    --muted: #9ca3af;
    --grid: #444444;
    --accent: #1a9850;
}

body.light {
    --bg: #ffffff;
    --surface: #f9fafb;
    --text: #000000;
    --muted: #6b7280;
    --grid: #cccccc;
    --accent: #1a9850;
}

.container {
    max-width: 1400px;
    margin: 0 auto;
    padding: 2rem;
}

header {
    margin-bottom: 2rem;
    padding-bottom: 1rem;
    border-bottom: 2px solid var(--grid);
}

header h1 {
    font-size: 1.75rem;
    font-weight: 700;
    margin-bottom: 0.5rem;
}

header .meta {
    color: var(--muted);
    font-size: 0.875rem;
}

.layout {
    display: grid;
    grid-template-columns: 280px 1fr;
    gap: 1.5rem;
    align-items: start;
}

.card {
    background: var(--surface);
    border: 1px solid var(--grid);
    border-radius: 0.5rem;
    padding: 1.25rem;
    margin-bottom: 1.5rem;
}

.card h2 {
    font-size: 1.1rem;
    font-weight: 700;
    margin-bottom: 0.75rem;
}

.hint {
    color: var(--muted);
    font-size: 0.8rem;
    margin-bottom: 0.75rem;
}

.chart-row {
    display: grid;
    grid-template-columns: 3fr 2fr;
    gap: 1.5rem;
}

canvas {
    width: 100%;
}

/* Sidebar controls */
.sidebar select,
#radar-select {
    width: 100%;
    padding: 0.4rem;
    margin-bottom: 1rem;
    background: var(--bg);
    color: var(--text);
    border: 1px solid var(--grid);
    border-radius: 0.25rem;
}

.control-label {
    display: block;
    font-size: 0.8rem;
    font-weight: 600;
    margin-bottom: 0.25rem;
}

.control.toggle {
    display: block;
    font-size: 0.875rem;
    margin-bottom: 0.75rem;
    cursor: pointer;
}

#stats {
    font-size: 0.8rem;
}

#stats .stat-line {
    display: flex;
    justify-content: space-between;
    margin-bottom: 0.25rem;
}

#stats .stat-line .value {
    font-weight: 700;
}

#stats .overall {
    border-top: 1px solid var(--grid);
    margin-top: 0.5rem;
    padding-top: 0.5rem;
}

/* Heatmap grid */
.hm-grid {
    display: grid;
    gap: 2px;
    font-size: 0.8rem;
}

.hm-corner {
    background: transparent;
}

.hm-col-label,
.hm-row-label {
    padding: 0.4rem;
    font-weight: 600;
}

.hm-row-label {
    cursor: pointer;
    text-decoration: underline dotted;
}

.hm-cell {
    padding: 0.6rem 0.4rem;
    text-align: center;
    font-weight: 700;
    color: #000000;
    border-radius: 0.2rem;
    cursor: default;
}

/* Tooltip */
.tooltip {
    position: fixed;
    z-index: 20;
    max-width: 320px;
    padding: 0.5rem 0.75rem;
    font-size: 0.75rem;
    white-space: pre-line;
    background: var(--surface);
    color: var(--text);
    border: 1px solid var(--grid);
    border-radius: 0.35rem;
    pointer-events: none;
}

/* Modal */
.modal-backdrop {
    position: fixed;
    inset: 0;
    z-index: 30;
    background: rgba(0, 0, 0, 0.6);
    display: flex;
    align-items: center;
    justify-content: center;
}

.modal {
    width: min(760px, 92vw);
    max-height: 85vh;
    overflow-y: auto;
    background: var(--surface);
    border: 1px solid var(--grid);
    border-radius: 0.5rem;
    padding: 1.25rem;
}

.modal-head {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 0.75rem;
}

.modal-head button {
    background: none;
    border: none;
    color: var(--muted);
    font-size: 1.5rem;
    cursor: pointer;
}

.modal-body blockquote {
    border-left: 3px solid var(--accent);
    padding-left: 0.75rem;
    margin: 0.75rem 0;
    font-style: italic;
    color: var(--muted);
}

.dim-cards {
    display: grid;
    grid-template-columns: 1fr 1fr;
    gap: 0.75rem;
    margin: 0.75rem 0;
}

.dim-card {
    border: 1px solid var(--grid);
    border-radius: 0.35rem;
    padding: 0.6rem;
    font-size: 0.8rem;
}

.dim-card .badge {
    float: right;
    padding: 0 0.4rem;
    border-radius: 0.25rem;
    color: #000000;
    font-weight: 700;
}

.modal-body ul {
    padding-left: 1.25rem;
    font-size: 0.85rem;
}

.modal-body .refs {
    color: var(--muted);
    font-size: 0.75rem;
    margin-top: 0.75rem;
}

footer {
    margin-top: 2rem;
    padding-top: 1rem;
    border-top: 1px solid var(--grid);
    text-align: center;
    color: var(--muted);
    font-size: 0.8rem;
}

@media (max-width: 900px) {
    .layout,
    .chart-row {
        grid-template-columns: 1fr;
    }
}
"#
}

/// Inline JavaScript: mirrors the controller arithmetic so the exported
/// file stays interactive offline.
fn inline_javascript() -> &'static str {
    r#"
(function() {
    var D = window.__gmData;
    var state = {
        year: D.initial.year,
        simulated: D.initial.simulated,
        theme: D.initial.theme,
        selected: D.initial.selected
    };
    var radarCategory = D.categories[0];

    function palette() { return D.palettes[state.theme]; }

    function recordsFor(year) {
        return D.records
            .filter(function(r) { return r.year === year; })
            .sort(function(a, b) { return a.category < b.category ? -1 : 1; });
    }

    // Clamped governance shift; threat and technical controls untouched.
    function adjustLevels(levels) {
        if (!state.simulated) return levels.slice();
        return [
            levels[0],
            levels[1],
            Math.min(4, levels[2] + D.delta),
            Math.min(4, levels[3] + D.delta)
        ];
    }

    function computeGaps() {
        var entries = recordsFor(state.year).map(function(r) {
            var lv = adjustLevels(r.levels);
            var best = Math.max(lv[1], lv[2], lv[3]);
            return { category: r.category, gap: lv[0] - best, threat: lv[0], best: best };
        });
        entries.sort(function(a, b) {
            if (b.gap !== a.gap) return b.gap - a.gap;
            return a.category < b.category ? -1 : 1;
        });
        return entries;
    }

    function sevColor(gap) {
        if (gap >= 3) return '#d73027';
        if (gap === 2) return '#fc8d59';
        if (gap === 1) return '#fee08b';
        return '#d9ef8b';
    }

    // Heatmap as a colored DOM grid with hover tooltips
    function renderHeatmap() {
        var el = document.getElementById('heatmap');
        var rows = recordsFor(state.year);
        var html = '<div class="hm-grid" style="grid-template-columns: 170px repeat(' + D.dimensions.length + ', 1fr);">';
        html += '<div class="hm-corner"></div>';
        D.dimensions.forEach(function(d) { html += '<div class="hm-col-label">' + d + '</div>'; });
        rows.forEach(function(r) {
            html += '<div class="hm-row-label" data-category="' + r.category + '">' + r.category + '</div>';
            var lv = adjustLevels(r.levels);
            lv.forEach(function(level, i) {
                var note = (r.notes && r.notes[i]) ? r.notes[i] : r.evidence;
                var tip = r.category + ' — ' + D.dimensions[i] + '\nLevel ' + level + ': ' + D.level_labels[level] + '\n' + note;
                html += '<div class="hm-cell" style="background:' + D.color_scale[level] + ';" data-tip="' + encodeURIComponent(tip) + '">' + level + '</div>';
            });
        });
        html += '</div>';
        el.innerHTML = html;

        el.querySelectorAll('.hm-row-label').forEach(function(label) {
            label.addEventListener('click', function() { openModal(this.dataset.category); });
        });
        var tooltip = document.getElementById('tooltip');
        el.querySelectorAll('.hm-cell').forEach(function(cell) {
            cell.addEventListener('mousemove', function(e) {
                tooltip.textContent = decodeURIComponent(this.dataset.tip);
                tooltip.hidden = false;
                tooltip.style.left = Math.min(e.clientX + 14, window.innerWidth - 340) + 'px';
                tooltip.style.top = (e.clientY + 14) + 'px';
            });
            cell.addEventListener('mouseleave', function() { tooltip.hidden = true; });
        });
    }

    function drawGapChart() {
        var el = document.getElementById('gap-chart');
        el.width = el.offsetWidth || 600;
        var ctx = el.getContext('2d'), W = el.width, H = el.height;
        var entries = computeGaps();
        var pal = palette();
        var lP = 36, tP = 12, bP = 40;
        var cW = W - lP - 10, cH = H - tP - bP;
        ctx.clearRect(0, 0, W, H);
        ctx.font = '10px system-ui,sans-serif';
        for (var t = 0; t <= 4; t++) {
            var yp = tP + cH - (t / 4) * cH;
            ctx.fillStyle = pal.muted; ctx.textAlign = 'right';
            ctx.fillText(t, lP - 6, yp + 3);
            ctx.strokeStyle = pal.grid; ctx.lineWidth = 0.5;
            ctx.beginPath(); ctx.moveTo(lP, yp); ctx.lineTo(lP + cW, yp); ctx.stroke();
        }
        var bW = cW / entries.length, gap = Math.max(6, bW * 0.25);
        entries.forEach(function(entry, i) {
            var h = (Math.max(0, entry.gap) / 4) * cH;
            var x = lP + i * bW + gap / 2, w = bW - gap;
            ctx.fillStyle = sevColor(entry.gap);
            ctx.fillRect(x, tP + cH - h, w, h);
            ctx.fillStyle = pal.text; ctx.textAlign = 'center';
            ctx.font = 'bold 11px system-ui,sans-serif';
            ctx.fillText(entry.gap, x + w / 2, tP + cH - h - 4);
            ctx.font = '9px system-ui,sans-serif';
            ctx.fillStyle = pal.muted;
            wrapLabel(ctx, entry.category, x + w / 2, tP + cH + 12, bW);
        });
    }

    function wrapLabel(ctx, text, x, y, maxWidth) {
        var words = text.split(' '), line = '', dy = 0;
        words.forEach(function(word) {
            var probe = line ? line + ' ' + word : word;
            if (ctx.measureText(probe).width > maxWidth - 4 && line) {
                ctx.fillText(line, x, y + dy);
                line = word; dy += 10;
            } else {
                line = probe;
            }
        });
        ctx.fillText(line, x, y + dy);
    }

    function drawRadar() {
        var el = document.getElementById('radar-chart');
        el.width = el.offsetWidth || 320;
        var ctx = el.getContext('2d'), W = el.width, H = el.height;
        var pal = palette();
        var record = recordsFor(state.year).filter(function(r) { return r.category === radarCategory; })[0];
        if (!record) return;
        var lv = adjustLevels(record.levels);
        var cx = W / 2, cy = H / 2 + 6, R = Math.min(W, H) / 2 - 34;
        var N = D.dimensions.length;

        function point(i, fraction) {
            var angle = -Math.PI / 2 + (2 * Math.PI * i) / N;
            return { x: cx + Math.cos(angle) * R * fraction, y: cy + Math.sin(angle) * R * fraction };
        }

        ctx.clearRect(0, 0, W, H);
        // Radial grid rings at each level
        for (var ring = 1; ring <= 4; ring++) {
            ctx.strokeStyle = pal.grid; ctx.lineWidth = 0.5;
            ctx.setLineDash(ring === 2 ? [3, 3] : []);
            ctx.beginPath();
            for (var i = 0; i <= N; i++) {
                var p = point(i % N, ring / 4);
                if (i === 0) ctx.moveTo(p.x, p.y); else ctx.lineTo(p.x, p.y);
            }
            ctx.stroke();
        }
        ctx.setLineDash([]);
        // Axes and labels
        ctx.font = '9px system-ui,sans-serif';
        for (var a = 0; a < N; a++) {
            var rim = point(a, 1);
            ctx.strokeStyle = pal.grid; ctx.lineWidth = 0.5;
            ctx.beginPath(); ctx.moveTo(cx, cy); ctx.lineTo(rim.x, rim.y); ctx.stroke();
            var lbl = point(a, 1.22);
            ctx.fillStyle = pal.muted; ctx.textAlign = 'center';
            ctx.fillText(D.dimensions[a], lbl.x, lbl.y);
        }
        // Polygon
        ctx.beginPath();
        for (var v = 0; v <= N; v++) {
            var vp = point(v % N, lv[v % N] / 4);
            if (v === 0) ctx.moveTo(vp.x, vp.y); else ctx.lineTo(vp.x, vp.y);
        }
        ctx.closePath();
        ctx.globalAlpha = 0.25; ctx.fillStyle = pal.accent; ctx.fill(); ctx.globalAlpha = 1.0;
        ctx.strokeStyle = pal.accent; ctx.lineWidth = 2; ctx.stroke();
        for (var m = 0; m < N; m++) {
            var mp = point(m, lv[m] / 4);
            ctx.fillStyle = pal.accent;
            ctx.beginPath(); ctx.arc(mp.x, mp.y, 3.5, 0, 2 * Math.PI); ctx.fill();
        }
    }

    function renderStats() {
        var rows = recordsFor(state.year);
        var sums = [0, 0, 0, 0];
        rows.forEach(function(r) {
            adjustLevels(r.levels).forEach(function(level, i) { sums[i] += level; });
        });
        var avgs = sums.map(function(s) { return s / rows.length; });
        var lines = ['Threat Maturity', 'Technical Controls', 'Governance', 'Stakeholder Protection']
            .map(function(label, i) {
                return '<div class="stat-line"><span>' + label + '</span><span class="value">' + avgs[i].toFixed(1) + '</span></div>';
            }).join('');
        lines += '<div class="stat-line overall"><span>Overall Gap</span><span class="value">' + (avgs[0] - avgs[3]).toFixed(1) + '</span></div>';
        document.getElementById('stats').innerHTML = lines;
    }

    function openModal(category) {
        state.selected = category;
        var profile = D.profiles.filter(function(p) { return p.category === category; })[0];
        var record = recordsFor(state.year).filter(function(r) { return r.category === category; })[0];
        if (!record) return;
        var lv = adjustLevels(record.levels);
        var body = '';
        if (profile && profile.description) body += '<p>' + profile.description + '</p>';
        if (profile && profile.quote) body += '<blockquote>' + profile.quote + '</blockquote>';
        body += '<div class="dim-cards">';
        D.dimensions.forEach(function(d, i) {
            var note = (record.notes && record.notes[i]) ? record.notes[i] : record.evidence;
            body += '<div class="dim-card"><span class="badge" style="background:' + D.color_scale[lv[i]] + ';">Level ' + lv[i] + '</span>'
                + '<strong>' + d + '</strong><br>' + D.level_labels[lv[i]] + '<br>' + note + '</div>';
        });
        body += '</div>';
        if (profile && profile.incidents.length) {
            body += '<strong>Real-world incidents</strong><ul>';
            profile.incidents.forEach(function(incident) { body += '<li>' + incident + '</li>'; });
            body += '</ul>';
        }
        if (profile && profile.references.length) {
            body += '<p class="refs">References: ' + profile.references.join(', ') + '</p>';
        }
        document.getElementById('modal-title').textContent = category;
        document.getElementById('modal-body').innerHTML = body;
        document.getElementById('modal-backdrop').hidden = false;
    }

    function closeModal() {
        state.selected = null;
        document.getElementById('modal-backdrop').hidden = true;
    }

    function applyTheme() {
        document.body.className = state.theme;
    }

    function renderData() {
        renderHeatmap();
        drawGapChart();
        drawRadar();
        renderStats();
    }

    document.addEventListener('DOMContentLoaded', function() {
        var radarSelect = document.getElementById('radar-select');
        D.categories.forEach(function(category) {
            var option = document.createElement('option');
            option.value = category; option.textContent = category;
            radarSelect.appendChild(option);
        });
        radarSelect.value = radarCategory;

        document.getElementById('year-select').addEventListener('change', function() {
            var year = parseInt(this.value, 10);
            if (D.years.indexOf(year) === -1) return;
            state.year = year;
            renderData();
        });
        document.getElementById('sim-toggle').addEventListener('change', function() {
            state.simulated = this.checked;
            renderData();
        });
        document.getElementById('theme-toggle').addEventListener('change', function() {
            state.theme = this.checked ? 'dark' : 'light';
            applyTheme();
            // Color scales only; chart data is unchanged
            drawGapChart();
            drawRadar();
        });
        radarSelect.addEventListener('change', function() {
            radarCategory = this.value;
            drawRadar();
        });
        document.getElementById('modal-close').addEventListener('click', closeModal);
        document.getElementById('modal-backdrop').addEventListener('click', function(e) {
            if (e.target === this) closeModal();
        });

        applyTheme();
        renderData();
        if (state.selected) openModal(state.selected);
        window.addEventListener('resize', function() { drawGapChart(); drawRadar(); });
    });
})();
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn document_embeds_dataset_and_controls() {
        let dataset = Dataset::builtin();
        let state = ViewState::new(dataset.baseline_year());
        let html = render_html(&dataset, &state, &SimulationParams::default());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("window.__gmData"));
        assert!(html.contains("year-select"));
        assert!(html.contains("sim-toggle"));
        for category in dataset.categories() {
            assert!(html.contains(category.as_str()));
        }
    }

    #[test]
    fn initial_state_is_reflected_in_the_document() {
        let dataset = Dataset::builtin();
        let mut state = ViewState::new(dataset.baseline_year());
        state.theme = Theme::Light;
        state.simulation_enabled = true;
        let html = render_html(&dataset, &state, &SimulationParams::default());

        assert!(html.contains(r#"<body class="light">"#));
        assert!(html.contains(r#""simulated":true"#));
    }
}
