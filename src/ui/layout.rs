//! Default markup and styles, injected when the host page brings none.

use wasm_bindgen::prelude::*;
use web_sys::Document;

const STYLE: &str = r#"
#gacha-root { position:relative; width:100%; min-height:100vh; display:flex; flex-direction:column; align-items:center; font-family:sans-serif; background:#fdf6e3; }
#gacha-machine { position:relative; width:260px; height:420px; margin-top:24px; border-radius:24px; background:#ff7675; box-shadow:0 8px 24px rgba(0,0,0,0.2); transition:opacity 0.4s; }
#gacha-machine.faded { opacity:0.3; }
.globe { position:absolute; top:20px; left:30px; width:200px; height:180px; border-radius:50%; background:rgba(255,255,255,0.7); overflow:hidden; }
.deco-capsule { position:absolute; width:40px; height:40px; border-radius:50%; }
.shake-animation { animation:gacha-shake 0.3s infinite; }
#coin-slot { position:absolute; top:230px; right:30px; width:40px; height:60px; border-radius:8px; background:#2d3436; }
#required-coins-display { position:absolute; top:300px; right:26px; width:48px; text-align:center; font-weight:bold; color:#fff; }
#required-coins-display.ready { color:#55efc4; }
#handle-container { position:absolute; top:230px; left:50%; width:80px; height:80px; transform:translateX(-50%) rotate(0deg); transform-origin:center; cursor:grab; }
#handle-container.disabled { opacity:0.5; pointer-events:none; }
#handle { width:80px; height:80px; border-radius:50%; background:#dfe6e9; border:6px solid #636e72; box-sizing:border-box; position:relative; }
#handle::after { content:''; position:absolute; top:30px; left:-4px; width:80px; height:8px; background:#636e72; }
#capsule-exit { position:absolute; bottom:20px; left:50%; width:70px; height:50px; transform:translateX(-50%); background:#2d3436; border-radius:10px; }
#capsule-tray { width:260px; height:70px; margin-top:8px; border-radius:0 0 24px 24px; background:#fab1a0; }
#coin-area { width:100%; max-width:520px; height:160px; margin-top:12px; border:2px dashed #b2bec3; border-radius:16px; }
#get-coin-btn { display:flex; gap:8px; margin-top:12px; }
.coin-btn, #play-again-btn, .toolbar button { padding:8px 14px; border:none; border-radius:8px; background:#fdcb6e; font-size:16px; cursor:pointer; }
.coin { position:fixed; width:90px; height:90px; border-radius:50%; background:radial-gradient(circle at 30% 30%, #ffeaa7, #e1b12c); display:flex; align-items:center; justify-content:center; font-weight:bold; font-size:24px; cursor:grab; user-select:none; touch-action:none; z-index:100; }
.capsule { position:fixed; width:60px; height:60px; border-radius:50%; z-index:200; cursor:pointer; }
.capsule-drop { transition:transform 0.8s cubic-bezier(.5,0,.75,1.4); animation:gacha-drop 0.8s; }
.capsule.opening { animation:gacha-open 0.8s forwards; }
#prize-display { display:none; position:fixed; inset:0; flex-direction:column; align-items:center; justify-content:center; gap:12px; background:rgba(0,0,0,0.55); color:#fff; z-index:300; }
#prize-display img { max-width:60vw; max-height:50vh; border-radius:12px; }
.prize-text { font-size:32px; }
.prize-rarity { font-size:14px; text-transform:uppercase; letter-spacing:2px; }
.toolbar { position:fixed; top:10px; right:12px; display:flex; gap:8px; z-index:50; }
.modal { position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.4); z-index:400; }
.modal-body { background:#fff; border-radius:12px; padding:16px 20px; min-width:280px; max-height:80vh; overflow:auto; }
.hidden { display:none !important; }
.prize-setting { display:flex; gap:6px; align-items:center; margin:4px 0; }
.file-selected { outline:2px solid #55efc4; }
.stats-row { display:flex; justify-content:space-between; gap:24px; }
@keyframes gacha-shake { 0%,100% { transform:translateX(0); } 25% { transform:translateX(-3px); } 75% { transform:translateX(3px); } }
@keyframes gacha-drop { from { opacity:0.6; } to { opacity:1; } }
@keyframes gacha-open { 0% { transform:scale(1); } 50% { transform:scale(1.3) rotate(15deg); } 100% { transform:scale(0); opacity:0; } }
"#;

const MARKUP: &str = r#"
<div class="toolbar"><button id="stats-btn" type="button">統計</button><button id="settings-btn" type="button">設定</button></div>
<div id="gacha-machine">
  <div class="globe">
    <div class="deco-capsule" style="top:40px;left:30px;background:#74b9ff"></div>
    <div class="deco-capsule" style="top:90px;left:80px;background:#55efc4"></div>
    <div class="deco-capsule" style="top:50px;left:120px;background:#ffeaa7"></div>
    <div class="deco-capsule" style="top:110px;left:140px;background:#a29bfe"></div>
  </div>
  <div id="handle-container" class="disabled"><div id="handle"></div></div>
  <div id="coin-slot"></div>
  <div id="required-coins-display"></div>
  <div id="capsule-exit"></div>
</div>
<div id="capsule-tray"></div>
<div id="get-coin-btn"></div>
<div id="coin-area"></div>
<div id="prize-display"></div>
<div id="password-modal" class="modal hidden"><div class="modal-body">
  <input id="password-input" type="password" placeholder="密碼">
  <button id="password-submit" type="button">確定</button>
  <button class="close-btn" type="button">取消</button>
</div></div>
<div id="settings-panel" class="modal hidden"><div class="modal-body">
  <h3>獎品設定</h3>
  <div id="settings-form"></div>
  <button id="save-settings-btn" type="button">儲存</button>
  <button class="close-btn" type="button">關閉</button>
</div></div>
<div id="stats-modal" class="modal hidden"><div class="modal-body">
  <h3>統計</h3>
  <div id="stats-body"></div>
  <button id="reset-stats-btn" type="button">重設統計</button>
  <button class="close-btn" type="button">關閉</button>
</div></div>
"#;

pub(crate) fn ensure_layout(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id("gacha-style").is_none() {
        let style = doc.create_element("style")?;
        style.set_id("gacha-style");
        style.set_text_content(Some(STYLE));
        if let Some(head) = doc.head() {
            head.append_child(&style)?;
        }
    }
    if doc.get_element_by_id("gacha-machine").is_some() {
        return Ok(());
    }
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let root = doc.create_element("div")?;
    root.set_id("gacha-root");
    root.set_inner_html(MARKUP);
    body.append_child(&root)?;
    Ok(())
}
