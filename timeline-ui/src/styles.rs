#![cfg(target_arch = "wasm32")]

use timeline_core::{ENTRANCE_DURATION_SECS, ENTRANCE_OFFSET_PX, ENTRANCE_STAGGER_SECS};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-timeline-ui]";

/// Default CSS for the component along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --timeline-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --timeline-bg: transparent;
  --timeline-card-bg: rgba(255, 255, 255, 0.05);
  --timeline-card-border: rgba(255, 255, 255, 0.1);
  --timeline-radius: 8px;
  --timeline-text: rgba(255, 255, 255, 0.9);
  --timeline-heading: #ffffff;
  --timeline-bar-border: rgba(255, 255, 255, 0.4);
  --timeline-bar-fill: #ffffff;
  --timeline-node-bg: #0a0a0a;
}

.timeline-shell {
  position: relative;
  width: 100%;
  height: 100%;
  font-family: var(--timeline-font-family);
  background: var(--timeline-bg);
  color: var(--timeline-text);
}

.timeline-header-fade {
  position: absolute;
  top: 0;
  left: 0;
  right: 0;
  z-index: 10;
  height: 64px;
  pointer-events: none;
  background: linear-gradient(to bottom, var(--timeline-node-bg), transparent);
}

.timeline-scroll {
  width: 100%;
  height: 100%;
}

.timeline-scroll.is-desktop {
  overflow-y: scroll;
  overflow-x: hidden;
  scrollbar-width: none;
  -ms-overflow-style: none;
  -webkit-overflow-scrolling: touch;
  touch-action: pan-y;
  overscroll-behavior: contain;
}

.timeline-scroll.is-desktop::-webkit-scrollbar {
  display: none;
}

.timeline-content {
  position: relative;
  width: 100%;
  min-height: 100%;
  padding-top: 48px;
  padding-bottom: 96px;
}

.timeline-content.is-mobile {
  min-height: 0;
  padding-top: 64px;
  padding-bottom: 48px;
}

.timeline-heading {
  position: relative;
  margin-bottom: 64px;
  padding: 0 32px;
}

.timeline-heading h1 {
  margin: 0;
  font-size: 2.25rem;
  font-weight: 500;
  color: var(--timeline-heading);
}

.timeline-bar {
  position: absolute;
  top: 0;
  bottom: 80px;
  width: 12px;
  pointer-events: none;
}

.timeline-bar.bar-center {
  left: 50%;
  transform: translateX(-50%);
}

.timeline-bar.bar-pin-left {
  left: 32px;
  transform: translateX(-50%);
}

.timeline-bar.bar-pin-right {
  right: 16px;
  transform: translateX(50%);
}

.timeline-bar-track {
  position: absolute;
  top: 0;
  bottom: 0;
  width: 100%;
  border: 2px solid var(--timeline-bar-border);
  border-radius: 999px;
  background: transparent;
}

.timeline-bar-fill {
  position: absolute;
  top: 0;
  left: 50%;
  transform: translateX(-50%);
  width: 8px;
  border-radius: 999px;
  background: var(--timeline-bar-fill);
  transform-origin: top;
}

.timeline-items {
  position: relative;
}

.timeline-row {
  position: relative;
  margin-bottom: 192px;
}

.timeline-row.is-mobile {
  margin-bottom: 32px;
}

.timeline-node {
  position: absolute;
  left: 50%;
  transform: translateX(-50%);
  width: 28px;
  height: 28px;
  z-index: 20;
}

.timeline-node.pin-left {
  left: 32px;
  top: 20px;
}

.timeline-node.pin-right {
  left: auto;
  right: 16px;
  top: 20px;
  transform: translateX(50%);
}

.timeline-node-ring {
  position: absolute;
  inset: 0;
  border: 2px solid var(--timeline-bar-border);
  border-radius: 999px;
  background: var(--timeline-node-bg);
}

.timeline-node-fill {
  position: absolute;
  inset: 0;
  border: 2px solid var(--timeline-bar-fill);
  border-radius: 999px;
  background: var(--timeline-bar-fill);
  transition: clip-path 0.2s ease-out;
}

.timeline-row-slots {
  display: flex;
  align-items: center;
  gap: 64px;
  padding: 0 32px;
  max-width: 1280px;
  margin: 0 auto;
}

.timeline-row-gap {
  width: 0;
}

.timeline-slot {
  flex: 1;
  opacity: 0;
  transform: translateX(calc(-1 * var(--timeline-entrance-offset)));
  transition: opacity var(--timeline-entrance-duration) ease-out,
    transform var(--timeline-entrance-duration) ease-out;
}

.timeline-slot.slot-right {
  transform: translateX(var(--timeline-entrance-offset));
  transition-delay: var(--timeline-entrance-stagger);
}

.timeline-slot.is-visible {
  opacity: 1;
  transform: translateX(0);
}

.timeline-slot-empty {
  min-height: 1px;
}

.timeline-card {
  background: var(--timeline-card-bg);
  backdrop-filter: blur(4px);
  border: 1px solid var(--timeline-card-border);
  border-radius: var(--timeline-radius);
  padding: 32px;
  transition: box-shadow 0.3s ease, transform 0.3s ease;
}

.timeline-card:hover {
  box-shadow: 0 10px 24px rgba(0, 0, 0, 0.25);
  transform: translateY(-4px);
}

.timeline-card-title {
  margin: 0 0 12px;
  font-size: 1.25rem;
  font-weight: 600;
  color: var(--timeline-heading);
}

.timeline-card-text {
  margin: 0;
  line-height: 1.6;
}

.timeline-image {
  border-radius: var(--timeline-radius);
  overflow: hidden;
}

.timeline-image img {
  display: block;
  width: 100%;
  height: auto;
  object-fit: cover;
  border-radius: var(--timeline-radius);
}

.timeline-image.is-inline {
  margin-top: 12px;
  max-width: 280px;
  aspect-ratio: 1 / 1;
}

.timeline-image.is-inline img {
  height: 100%;
}

.timeline-mobile-item {
  display: flex;
}

.timeline-mobile-item.pin-right {
  padding-left: 8px;
  padding-right: 48px;
}

.timeline-mobile-item.pin-left {
  padding-left: 64px;
  padding-right: 8px;
}

.timeline-mobile-item .timeline-card {
  flex: 1;
  padding: 24px;
  opacity: 0;
  transform: translateX(calc(-1 * var(--timeline-entrance-offset)));
  transition: opacity var(--timeline-entrance-duration) ease-out,
    transform var(--timeline-entrance-duration) ease-out;
}

.timeline-mobile-item.pin-left .timeline-card {
  transform: translateX(var(--timeline-entrance-offset));
}

.timeline-mobile-item .timeline-card.is-visible {
  opacity: 1;
  transform: translateX(0);
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head> element"))?;

    // Entrance timing tokens come from the engine constants so presentation
    // and computed state cannot drift apart.
    let tokens = format!(
        ":root {{\n  --timeline-entrance-duration: {ENTRANCE_DURATION_SECS}s;\n  --timeline-entrance-stagger: {ENTRANCE_STAGGER_SECS}s;\n  --timeline-entrance-offset: {ENTRANCE_OFFSET_PX}px;\n}}\n"
    );

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-timeline-ui", "v1")?;
    style_el.set_text_content(Some(&format!("{tokens}{DEFAULT_STYLES}")));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
