//! Yew timeline component for WebAssembly environments.

#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::styles;
    use serde_wasm_bindgen::from_value;
    use timeline_core::{
        desktop_side, empty_frame, slot_content, ListenerLedger, Side, SlotContent,
        SourceMode, TimelineConfig, TimelineEntry, TimelineFrame, TimelineGeometry,
        TimelineState, INTERSECTION_ROOT_MARGIN, INTERSECTION_THRESHOLDS,
    };
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{
        console, AddEventListenerOptions, Element, Event, EventTarget, IntersectionObserver,
        IntersectionObserverEntry, IntersectionObserverInit, Window,
    };
    use yew::prelude::*;

    /// Delay before the first forced recomputation, so layout can settle.
    const SETTLE_DELAY_MS: i32 = 100;

    #[derive(Properties, PartialEq)]
    pub struct TimelineViewProps {
        pub entries: Vec<TimelineEntry>,
        #[prop_or_default]
        pub config: TimelineConfig,
    }

    #[function_component(TimelineView)]
    pub fn timeline_view(props: &TimelineViewProps) -> Html {
        use_effect_with((), |_| {
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
            }
            || ()
        });

        let entry_count = props.entries.len();
        let config = props.config.clone();

        let container_ref = use_node_ref();
        let content_ref = use_node_ref();
        let bar_ref = use_node_ref();
        let marker_refs = use_memo(entry_count, |count| {
            (0..*count).map(|_| NodeRef::default()).collect::<Vec<_>>()
        });
        let item_refs = use_memo(entry_count, |count| {
            (0..*count).map(|_| NodeRef::default()).collect::<Vec<_>>()
        });

        let is_mobile = use_state(|| false);
        let frame = use_state(empty_frame);
        let engine = use_mut_ref(|| {
            TimelineState::new(0, SourceMode::ContainerRelative, TimelineConfig::default())
        });
        let ledger = use_mut_ref(ListenerLedger::default);

        {
            let container_ref = container_ref.clone();
            let content_ref = content_ref.clone();
            let bar_ref = bar_ref.clone();
            let marker_refs = marker_refs.clone();
            let item_refs = item_refs.clone();
            let is_mobile_handle = is_mobile.clone();
            let frame = frame.clone();
            let engine = engine.clone();
            let ledger = ledger.clone();

            use_effect_with(
                (entry_count, *is_mobile, config.clone()),
                move |(entry_count, mobile, config): &(usize, bool, TimelineConfig)| {
                    // Correct the viewport class first; a mismatch re-runs
                    // this effect with the right mode before subscribing.
                    if let Some(width) = viewport_width() {
                        let should_be_mobile = width < config.mobile_breakpoint_px;
                        if should_be_mobile != *mobile {
                            is_mobile_handle.set(should_be_mobile);
                            return Box::new(|| ()) as Box<dyn FnOnce()>;
                        }
                    }

                    let mode = if *mobile {
                        SourceMode::WindowGlobal
                    } else {
                        SourceMode::ContainerRelative
                    };
                    *engine.borrow_mut() = TimelineState::new(*entry_count, mode, config.clone());

                    let bundle = match attach_listeners(
                        *mobile,
                        config,
                        container_ref,
                        content_ref,
                        bar_ref,
                        marker_refs,
                        item_refs,
                        engine.clone(),
                        frame,
                        is_mobile_handle,
                        ledger,
                    ) {
                        Ok(bundle) => Some(bundle),
                        Err(err) => {
                            console::error_1(&err);
                            None
                        }
                    };

                    Box::new(move || {
                        if let Some(bundle) = bundle {
                            bundle.detach();
                        }
                        engine.borrow_mut().teardown();
                    }) as Box<dyn FnOnce()>
                },
            );
        }

        let mobile = *is_mobile;
        let progress = frame.progress;
        let bar_side = bar_side_class(mobile, config.mobile_side);

        html! {
            <div class="timeline-shell">
                if config.show_header && !mobile {
                    <div class="timeline-header-fade" />
                }
                <div
                    ref={container_ref}
                    class={classes!("timeline-scroll", (!mobile).then_some("is-desktop"))}
                >
                    <div
                        ref={content_ref}
                        class={classes!("timeline-content", mobile.then_some("is-mobile"))}
                    >
                        if config.show_header && !mobile {
                            <header class="timeline-heading">
                                <h1>{ config.header_text.clone() }</h1>
                            </header>
                        }
                        <div ref={bar_ref} class={classes!("timeline-bar", bar_side)}>
                            <div class="timeline-bar-track" />
                            <div
                                class="timeline-bar-fill"
                                style={format!("height: {:.3}%;", progress * 100.0)}
                            />
                        </div>
                        <div class="timeline-items">
                            {
                                for props.entries.iter().enumerate().map(|(index, entry)| {
                                    let fill = frame.fill_levels.get(index).copied().unwrap_or(0.0);
                                    let visible = frame.visible.get(index).copied().unwrap_or(false);
                                    let marker_ref = marker_refs[index].clone();
                                    if mobile {
                                        let item_ref = item_refs[index].clone();
                                        render_mobile_row(
                                            entry,
                                            index,
                                            fill,
                                            visible,
                                            marker_ref,
                                            item_ref,
                                            config.mobile_side,
                                        )
                                    } else {
                                        render_desktop_row(entry, index, fill, visible, marker_ref)
                                    }
                                })
                            }
                        </div>
                    </div>
                </div>
            </div>
        }
    }

    fn bar_side_class(mobile: bool, mobile_side: Side) -> &'static str {
        if !mobile {
            return "bar-center";
        }
        match mobile_side {
            Side::Left => "bar-pin-left",
            Side::Right => "bar-pin-right",
        }
    }

    fn render_marker(marker_ref: NodeRef, fill: f64, extra_class: Option<&'static str>) -> Html {
        html! {
            <div ref={marker_ref} class={classes!("timeline-node", extra_class)}>
                <div class="timeline-node-ring" />
                <div
                    class="timeline-node-fill"
                    style={format!("clip-path: inset({:.2}% 0 0 0);", (1.0 - fill) * 100.0)}
                />
            </div>
        }
    }

    fn render_desktop_row(
        entry: &TimelineEntry,
        index: usize,
        fill: f64,
        visible: bool,
        marker_ref: NodeRef,
    ) -> Html {
        let card_side = desktop_side(index);
        html! {
            <div class="timeline-row" key={entry.id.clone()}>
                { render_marker(marker_ref, fill, None) }
                <div class="timeline-row-slots">
                    { render_slot(Side::Left, card_side, entry, visible) }
                    <div class="timeline-row-gap" />
                    { render_slot(Side::Right, card_side, entry, visible) }
                </div>
            </div>
        }
    }

    fn render_slot(slot: Side, card_side: Side, entry: &TimelineEntry, visible: bool) -> Html {
        let side_class = match slot {
            Side::Left => "slot-left",
            Side::Right => "slot-right",
        };

        let content = match slot_content(slot, card_side, entry.image.is_some()) {
            SlotContent::Card => render_card(entry),
            SlotContent::Image => entry
                .image
                .as_ref()
                .map(|url| {
                    html! {
                        <div class="timeline-image">
                            <img src={url.clone()} alt={entry.title.clone()} />
                        </div>
                    }
                })
                .unwrap_or_default(),
            // Kept in the flow so row heights stay symmetric.
            SlotContent::Empty => html! { <div class="timeline-slot-empty" /> },
        };

        html! {
            <div class={classes!("timeline-slot", side_class, visible.then_some("is-visible"))}>
                { content }
            </div>
        }
    }

    fn render_card(entry: &TimelineEntry) -> Html {
        html! {
            <div class="timeline-card">
                <h3 class="timeline-card-title">{ entry.title.clone() }</h3>
                <p class="timeline-card-text">{ entry.text.clone() }</p>
            </div>
        }
    }

    fn render_mobile_row(
        entry: &TimelineEntry,
        index: usize,
        fill: f64,
        visible: bool,
        marker_ref: NodeRef,
        item_ref: NodeRef,
        side: Side,
    ) -> Html {
        let pin_class = match side {
            Side::Left => "pin-left",
            Side::Right => "pin-right",
        };
        html! {
            <div class={classes!("timeline-row", "is-mobile")} key={entry.id.clone()}>
                { render_marker(marker_ref, fill, Some(pin_class)) }
                <div
                    ref={item_ref}
                    class={classes!("timeline-mobile-item", pin_class)}
                    data-index={index.to_string()}
                >
                    <div class={classes!("timeline-card", visible.then_some("is-visible"))}>
                        <h3 class="timeline-card-title">{ entry.title.clone() }</h3>
                        <p class="timeline-card-text">{ entry.text.clone() }</p>
                        if let Some(url) = entry.image.clone() {
                            <div class="timeline-image is-inline">
                                <img src={url} alt={entry.title.clone()} />
                            </div>
                        }
                    </div>
                </div>
            </div>
        }
    }

    /// Everything attached to the platform for one mode; detached as a unit.
    struct ListenerBundle {
        scroll_target: EventTarget,
        on_scroll: Closure<dyn FnMut(Event)>,
        on_resize: Closure<dyn FnMut(Event)>,
        settle: Closure<dyn FnMut()>,
        settle_handle: i32,
        observer: Option<(
            IntersectionObserver,
            Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
        )>,
        ledger: Rc<RefCell<ListenerLedger>>,
    }

    impl ListenerBundle {
        fn detach(self) {
            let _ = self.scroll_target.remove_event_listener_with_callback(
                "scroll",
                self.on_scroll.as_ref().unchecked_ref(),
            );
            self.ledger.borrow_mut().detach_scroll();

            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    self.on_resize.as_ref().unchecked_ref(),
                );
                window.clear_timeout_with_handle(self.settle_handle);
            }
            self.ledger.borrow_mut().detach_resize();

            if let Some((observer, _callback)) = &self.observer {
                observer.disconnect();
                self.ledger.borrow_mut().detach_intersection();
            }

            drop(self.settle);
            if !self.ledger.borrow().is_empty() {
                console::warn_1(&JsValue::from_str("timeline listeners leaked on detach"));
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn attach_listeners(
        mobile: bool,
        config: &TimelineConfig,
        container_ref: NodeRef,
        content_ref: NodeRef,
        bar_ref: NodeRef,
        marker_refs: Rc<Vec<NodeRef>>,
        item_refs: Rc<Vec<NodeRef>>,
        engine: Rc<RefCell<TimelineState>>,
        frame: UseStateHandle<TimelineFrame>,
        is_mobile: UseStateHandle<bool>,
        ledger: Rc<RefCell<ListenerLedger>>,
    ) -> Result<ListenerBundle, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;

        let recompute: Rc<dyn Fn()> = {
            let engine = engine.clone();
            let frame = frame.clone();
            let container_ref = container_ref.clone();
            let marker_refs = marker_refs.clone();
            Rc::new(move || {
                // Container not mounted yet: keep the last known state.
                let Some(progress) = read_progress(mobile, &container_ref) else {
                    return;
                };
                let geometry = measure_geometry(&content_ref, &bar_ref, &marker_refs);
                let next = {
                    let mut engine = engine.borrow_mut();
                    engine.on_scroll(progress, &geometry);
                    engine.frame()
                };
                frame.set(next);
            })
        };

        let options = AddEventListenerOptions::new();
        options.set_passive(true);

        let on_scroll = Closure::<dyn FnMut(Event)>::new({
            let recompute = recompute.clone();
            move |_event: Event| recompute()
        });
        let scroll_target: EventTarget = if mobile {
            window.clone().into()
        } else {
            container_ref
                .cast::<Element>()
                .ok_or_else(|| JsValue::from_str("timeline container is not mounted"))?
                .into()
        };
        scroll_target.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
            &options,
        )?;
        ledger.borrow_mut().attach_scroll();

        let on_resize = Closure::<dyn FnMut(Event)>::new({
            let recompute = recompute.clone();
            let is_mobile = is_mobile.clone();
            let breakpoint = config.mobile_breakpoint_px;
            move |_event: Event| {
                if let Some(width) = viewport_width() {
                    let next = width < breakpoint;
                    if next != mobile {
                        // Crossing the breakpoint remounts listeners in the
                        // new mode; the effect cleanup detaches this set.
                        is_mobile.set(next);
                        return;
                    }
                }
                recompute();
            }
        });
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "resize",
            on_resize.as_ref().unchecked_ref(),
            &options,
        )?;
        ledger.borrow_mut().attach_resize();

        let settle = Closure::<dyn FnMut()>::new({
            let recompute = recompute.clone();
            move || recompute()
        });
        let settle_handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            settle.as_ref().unchecked_ref(),
            SETTLE_DELAY_MS,
        )?;

        let observer = if mobile {
            Some(observe_items(&item_refs, engine, frame.clone(), &ledger)?)
        } else {
            None
        };

        recompute();

        Ok(ListenerBundle {
            scroll_target,
            on_scroll,
            on_resize,
            settle,
            settle_handle,
            observer,
            ledger,
        })
    }

    fn observe_items(
        item_refs: &[NodeRef],
        engine: Rc<RefCell<TimelineState>>,
        frame: UseStateHandle<TimelineFrame>,
        ledger: &Rc<RefCell<ListenerLedger>>,
    ) -> Result<
        (
            IntersectionObserver,
            Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
        ),
        JsValue,
    > {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |observed: js_sys::Array, _observer: IntersectionObserver| {
                let next = {
                    let mut engine = engine.borrow_mut();
                    for entry in observed.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        let Some(index) = entry
                            .target()
                            .get_attribute("data-index")
                            .and_then(|raw| raw.parse::<usize>().ok())
                        else {
                            continue;
                        };
                        engine.observe_intersection(index, entry.intersection_ratio());
                    }
                    engine.frame()
                };
                frame.set(next);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_root_margin(INTERSECTION_ROOT_MARGIN);
        let thresholds = js_sys::Array::new();
        for threshold in INTERSECTION_THRESHOLDS {
            thresholds.push(&JsValue::from_f64(threshold));
        }
        init.set_threshold(&thresholds);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        for node in item_refs {
            if let Some(element) = node.cast::<Element>() {
                observer.observe(&element);
            }
        }
        ledger.borrow_mut().attach_intersection();

        Ok((observer, callback))
    }

    fn read_progress(mobile: bool, container_ref: &NodeRef) -> Option<f64> {
        if mobile {
            let window = web_sys::window()?;
            let scroll_top = window.scroll_y().ok()?;
            let document_height = window
                .document()
                .and_then(|document| document.document_element())
                .map(|root| root.scroll_height() as f64)?;
            let viewport_height = window.inner_height().ok()?.as_f64()?;
            Some(timeline_core::scroll_progress(
                scroll_top,
                document_height - viewport_height,
            ))
        } else {
            let container = container_ref.cast::<Element>()?;
            Some(timeline_core::scroll_progress(
                container.scroll_top() as f64,
                (container.scroll_height() - container.client_height()) as f64,
            ))
        }
    }

    /// Geometry is re-measured before every computation; layout can shift
    /// between scroll events.
    fn measure_geometry(
        content_ref: &NodeRef,
        bar_ref: &NodeRef,
        marker_refs: &[NodeRef],
    ) -> TimelineGeometry {
        let bar_top_offset = content_ref
            .cast::<Element>()
            .map(|content| content.get_bounding_client_rect().top())
            .unwrap_or(0.0);
        let bar_total_height = bar_ref
            .cast::<Element>()
            .map(|bar| bar.client_height() as f64)
            .unwrap_or(0.0);
        let marker_centers = marker_refs
            .iter()
            .map(|node| {
                node.cast::<Element>().map(|marker| {
                    let rect = marker.get_bounding_client_rect();
                    rect.top() + rect.height() / 2.0
                })
            })
            .collect();

        TimelineGeometry {
            bar_total_height,
            bar_top_offset,
            marker_centers,
        }
    }

    fn viewport_width() -> Option<f64> {
        web_sys::window()?.inner_width().ok()?.as_f64()
    }

    #[wasm_bindgen]
    pub fn mount_timeline(selector: &str, docs: JsValue, config: JsValue) -> Result<(), JsValue> {
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("invalid selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("no element matches the selector"))?;

        let docs_value = from_value::<serde_json::Value>(docs)
            .map_err(|err| JsValue::from_str(&format!("could not read docs JSON: {err}")))?;
        let entries = timeline_cms::entries_from_docs_value(&docs_value)
            .map_err(|err| JsValue::from_str(&format!("Timeline error: {err}")))?;

        let config: TimelineConfig = if config.is_undefined() || config.is_null() {
            TimelineConfig::default()
        } else {
            from_value(config)
                .map_err(|err| JsValue::from_str(&format!("could not read config: {err}")))?
        };

        yew::Renderer::<TimelineView>::with_root_and_props(
            target,
            TimelineViewProps { entries, config },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_timeline;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_timeline(
    _: &str,
    _: wasm_bindgen::JsValue,
    _: wasm_bindgen::JsValue,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "timeline-ui only supports the wasm32 target",
    ))
}
