//! Self-contained HTML dashboard: inline styles, report data embedded as
//! JSON, tabbed sections rendered client-side with vanilla JS.

use anyhow::Result;

use crate::models::UnifiedReportData;

/// Ensure the embedded JSON can't terminate the script block early.
fn escape_json_for_script(s: &str) -> String {
    s.replace("</script>", "<\\/script>")
}

/// Render the full document. A dimension with no data renders its section as
/// an explicit "no data available" message; nothing here fails over a
/// missing section.
pub fn render(report: &UnifiedReportData) -> Result<String> {
    let data_json = serde_json::to_string(report)?;

    let mut html = String::with_capacity(32_768);
    html.push_str(template_head());
    html.push_str("<script>const REPORT=");
    html.push_str(&escape_json_for_script(&data_json));
    html.push_str(";</script>\n");
    html.push_str(template_body());
    html.push_str(template_script());
    html.push_str("</body>\n</html>\n");
    Ok(html)
}

fn template_head() -> &'static str {
    r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Vitals – Unified Test Report</title>
<style>
:root{--bg:#0d0d11;--surface:#16161b;--surface2:#1e1e24;--border:#2a2a32;--text:#e4e4e7;--muted:#71717a;--green:#22c55e;--yellow:#eab308;--red:#ef4444;--blue:#3b82f6;--radius:8px}
*{box-sizing:border-box;margin:0;padding:0}
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:var(--bg);color:var(--text);line-height:1.5;min-height:100vh}
header{padding:1.25rem 1.5rem;border-bottom:1px solid var(--border);display:flex;align-items:baseline;gap:1rem;flex-wrap:wrap}
header h1{font-size:1.125rem;font-weight:700}
header .meta{font-size:.8125rem;color:var(--muted)}
.stats-bar{display:flex;border-bottom:1px solid var(--border);background:var(--surface)}
.stat{flex:1;padding:.875rem 1.25rem;border-right:1px solid var(--border);text-align:center}
.stat:last-child{border-right:none}
.stat .val{font-size:1.5rem;font-weight:700;display:block}
.stat .lbl{font-size:.75rem;color:var(--muted);text-transform:uppercase;letter-spacing:.5px}
.tabs{display:flex;gap:2px;padding:.75rem 1.5rem 0;border-bottom:1px solid var(--border)}
.tab{padding:.5rem .9rem;font-size:.8125rem;font-weight:600;border:none;border-radius:var(--radius) var(--radius) 0 0;background:transparent;color:var(--muted);cursor:pointer}
.tab:hover{color:var(--text)}
.tab.active{background:var(--surface);color:var(--text)}
.panel{display:none;padding:1.25rem 1.5rem}
.panel.active{display:block}
table{width:100%;border-collapse:collapse;font-size:.8125rem}
th{color:var(--muted);text-transform:uppercase;letter-spacing:.5px;font-size:.6875rem;text-align:left;padding:.45rem .6rem;border-bottom:1px solid var(--border)}
td{padding:.45rem .6rem;border-bottom:1px solid var(--border)}
.status-passed{color:var(--green)}
.status-failed{color:var(--red)}
.status-skipped{color:var(--muted)}
.status-unknown{color:var(--yellow)}
.tag{font-size:.6875rem;background:var(--surface2);border-radius:10px;padding:.1rem .5rem;margin-right:.25rem}
.score-line{display:flex;align-items:center;gap:.75rem;margin-bottom:1rem}
.score-line .big{font-size:2rem;font-weight:700}
.badge{font-size:.6875rem;font-weight:700;padding:.15rem .5rem;border-radius:4px;text-transform:uppercase}
.badge-scraped{background:rgba(234,179,8,.15);color:var(--yellow)}
.badge-measured{background:rgba(34,197,94,.15);color:var(--green)}
.bar{height:6px;background:var(--border);border-radius:3px;flex:1;max-width:260px}
.bar span{display:block;height:100%;border-radius:3px}
.finding{display:grid;grid-template-columns:auto 1fr auto;gap:.5rem;padding:.4rem 0;border-bottom:1px solid var(--border);font-size:.8125rem;align-items:start}
.finding .sev{font-size:.6875rem;font-weight:700;padding:.1rem .375rem;border-radius:4px;text-transform:uppercase;background:rgba(239,68,68,.15);color:var(--red)}
.finding .cnt{color:var(--muted);font-size:.75rem;white-space:nowrap}
.rec-list{margin:.75rem 0 0 1rem}
.rec-list li{font-size:.8125rem;color:var(--muted);margin-bottom:.25rem}
.no-data{color:var(--muted);font-size:.875rem;padding:1.5rem 0}
h3{font-size:.875rem;margin:1rem 0 .5rem}
</style>
</head>
<body>
"##
}

fn template_body() -> &'static str {
    r##"<header>
  <h1>Vitals</h1>
  <span class="meta" id="meta"></span>
</header>
<div class="stats-bar" id="stats-bar"></div>
<div class="tabs" id="tabs">
  <button class="tab active" data-panel="overview">Overview</button>
  <button class="tab" data-panel="tests">Test Results</button>
  <button class="tab" data-panel="coverage">Coverage</button>
  <button class="tab" data-panel="performance">Performance</button>
  <button class="tab" data-panel="accessibility">Accessibility</button>
  <button class="tab" data-panel="security">Security</button>
</div>
<div class="panel active" id="panel-overview"></div>
<div class="panel" id="panel-tests"></div>
<div class="panel" id="panel-coverage"></div>
<div class="panel" id="panel-performance"></div>
<div class="panel" id="panel-accessibility"></div>
<div class="panel" id="panel-security"></div>
"##
}

fn template_script() -> &'static str {
    r##"<script>
(function(){
"use strict";
const $=s=>document.querySelector(s);
const esc=s=>{const d=document.createElement('div');d.textContent=s==null?'':s;return d.innerHTML};
const scoreColor=v=>v>=80?'var(--green)':v>=50?'var(--yellow)':'var(--red)';
const fmtMs=v=>v>=1000?(v/1000).toFixed(1)+'s':v+'ms';

const S=REPORT.summary, M=REPORT.metadata;
$('#meta').textContent=`${M.project} ${M.version} · ${M.environment} · run ${M.run_id} · ${REPORT.generated_at}`;

$('#stats-bar').innerHTML=`
  <div class="stat"><span class="val">${S.total}</span><span class="lbl">Tests</span></div>
  <div class="stat"><span class="val status-passed">${S.passed}</span><span class="lbl">Passed</span></div>
  <div class="stat"><span class="val${S.failed?' status-failed':''}">${S.failed}</span><span class="lbl">Failed</span></div>
  <div class="stat"><span class="val">${S.pass_rate.toFixed(1)}%</span><span class="lbl">Pass rate</span></div>
  <div class="stat"><span class="val">${fmtMs(S.duration_ms)}</span><span class="lbl">Duration</span></div>
  <div class="stat"><span class="val" style="color:${scoreColor(S.health_score)}">${S.health_score.toFixed(1)}</span><span class="lbl">Health</span></div>`;

function dim(name){return REPORT.dimensions.find(d=>d.dimension===name)}

function renderOverview(){
  let html='<table><tr><th>Dimension</th><th>Score</th><th>Source</th><th>Findings</th></tr>';
  for(const name of ['accessibility','performance','coverage','security']){
    const d=dim(name);
    if(!d||d.source==='unavailable'){
      html+=`<tr><td>${name}</td><td colspan="3" class="no-data">no data available</td></tr>`;
      continue;
    }
    html+=`<tr><td>${name}</td><td style="color:${scoreColor(d.score)}">${d.score.toFixed(1)}</td>`+
      `<td><span class="badge badge-${d.source}">${d.source}</span></td><td>${d.findings.length}</td></tr>`;
  }
  html+='</table>';
  $('#panel-overview').innerHTML=html;
}

function renderTests(){
  if(!REPORT.outcomes.length){
    $('#panel-tests').innerHTML='<div class="no-data">no data available</div>';
    return;
  }
  let html='<table><tr><th>Status</th><th>Test</th><th>Project</th><th>Duration</th><th>Tags</th></tr>';
  for(const o of REPORT.outcomes){
    const title=o.suite_path.length?o.suite_path.join(' › ')+' › '+o.title:o.title;
    const tags=o.tags.map(t=>`<span class="tag">@${esc(t)}</span>`).join('');
    html+=`<tr><td class="status-${o.status}">${o.status}</td><td>${esc(title)}`+
      (o.error?`<br><small class="status-failed">${esc(o.error)}</small>`:'')+
      `</td><td>${esc(o.project||'–')}</td><td>${fmtMs(o.duration_ms)}</td><td>${tags}</td></tr>`;
  }
  html+='</table>';
  $('#panel-tests').innerHTML=html;
}

function renderDimension(name){
  const el=$('#panel-'+name);
  const d=dim(name);
  if(!d||d.source==='unavailable'){
    el.innerHTML='<div class="no-data">no data available</div>';
    return;
  }
  let html=`<div class="score-line"><span class="big" style="color:${scoreColor(d.score)}">${d.score.toFixed(1)}</span>`+
    `<span class="badge badge-${d.source}">${d.source==='scraped'?'scraped fallback':'measured'}</span>`+
    `<span class="bar"><span style="width:${d.score}%;background:${scoreColor(d.score)}"></span></span></div>`;
  if(d.findings.length){
    html+=`<h3>Findings (${d.findings.length})</h3>`;
    for(const f of d.findings){
      html+=`<div class="finding"><span class="sev">${esc(f.severity||'issue')}</span>`+
        `<span>${esc(f.description)} <small style="color:var(--muted)">${esc(f.id)}</small></span>`+
        `<span class="cnt">${f.element_count?f.element_count+' element(s)':''}</span></div>`;
    }
  }
  if(d.recommendations.length){
    html+='<h3>Recommendations</h3><ul class="rec-list">';
    for(const r of d.recommendations){
      html+='<li>'+esc(r.text)+(r.source==='scraped'?' <span class="badge badge-scraped">inferred</span>':'')+'</li>';
    }
    html+='</ul>';
  }
  el.innerHTML=html;
}

document.querySelectorAll('.tab').forEach(tab=>{
  tab.onclick=()=>{
    document.querySelectorAll('.tab').forEach(t=>t.classList.remove('active'));
    document.querySelectorAll('.panel').forEach(p=>p.classList.remove('active'));
    tab.classList.add('active');
    $('#panel-'+tab.dataset.panel).classList.add('active');
  };
});

renderOverview();
renderTests();
for(const name of ['coverage','performance','accessibility','security']) renderDimension(name);
})();
</script>
"##
}
