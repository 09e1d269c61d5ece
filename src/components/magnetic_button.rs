use std::rc::Rc;

use web_sys::{HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::motion::tween::{self, TweenHandle};
use crate::motion::{Animated, Ease, Tween, VisualPatch};

/// How far the button follows the cursor, as a fraction of the cursor's
/// distance from the button centre.
const PULL: f64 = 0.3;

pub fn magnetic_offset(cursor: (f64, f64), left: f64, top: f64, width: f64, height: f64) -> (f64, f64) {
    (
        (cursor.0 - left - width / 2.0) * PULL,
        (cursor.1 - top - height / 2.0) * PULL,
    )
}

#[derive(Properties, PartialEq)]
pub struct MagneticButtonProps {
    pub children: Children,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(MagneticButton)]
pub fn magnetic_button(props: &MagneticButtonProps) -> Html {
    let button_ref = use_node_ref();
    let hovered = use_state(|| false);
    let node = use_mut_ref(|| None::<Rc<Animated>>);
    let motion = use_mut_ref(|| None::<TweenHandle>);

    let target = {
        let button_ref = button_ref.clone();
        let node = node.clone();
        move || -> Option<(HtmlElement, Rc<Animated>)> {
            let element = button_ref.cast::<HtmlElement>()?;
            let animated = node
                .borrow_mut()
                .get_or_insert_with(|| Animated::new(element.clone()))
                .clone();
            Some((element, animated))
        }
    };

    let onmousemove = {
        let target = target.clone();
        let motion = motion.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some((element, animated)) = target() {
                let rect = element.get_bounding_client_rect();
                let (x, y) = magnetic_offset(
                    (e.client_x() as f64, e.client_y() as f64),
                    rect.left(),
                    rect.top(),
                    rect.width(),
                    rect.height(),
                );
                let follow = Tween::to(&animated, VisualPatch::new().x(x).y(y))
                    .duration(0.3)
                    .ease(Ease::Power2Out);
                *motion.borrow_mut() = Some(tween::play(follow));
            }
        })
    };

    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };

    let onmouseleave = {
        let hovered = hovered.clone();
        let motion = motion.clone();
        Callback::from(move |_: MouseEvent| {
            hovered.set(false);
            if let Some((_, animated)) = target() {
                let settle = Tween::to(&animated, VisualPatch::new().x(0.0).y(0.0))
                    .duration(0.5)
                    .ease(Ease::ElasticOut {
                        amplitude: 1.0,
                        period: 0.3,
                    });
                *motion.borrow_mut() = Some(tween::play(settle));
            }
        })
    };

    {
        let motion = motion.clone();
        use_effect_with_deps(
            move |_| {
                move || {
                    motion.borrow_mut().take();
                }
            },
            (),
        );
    }

    html! {
        <button
            ref={button_ref}
            class={classes!("magnetic-button", props.class.clone(), (*hovered).then(|| "hovered"))}
            onmousemove={onmousemove}
            onmouseenter={onmouseenter}
            onmouseleave={onmouseleave}
        >
            <span class="magnetic-label">{ props.children.clone() }</span>
            <span class="magnetic-fill"></span>
        </button>
    }
}
