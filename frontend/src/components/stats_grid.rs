use yew::{html, Children, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct StatsGridProps {
    pub columns: usize,
    pub children: Children,
}

pub struct StatsGrid;

impl Component for StatsGrid {
    type Message = ();
    type Properties = StatsGridProps;

    fn create(_ctx: &Context<Self>) -> Self {
        StatsGrid
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let style = format!(
            "display: grid;
             grid-template-columns: repeat({}, 1fr);
             gap: 16px;",
            props.columns
        );

        html! {
            <div class="stats-grid" style={style}>
                { for props.children.iter() }
            </div>
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub label: &'static str,
    pub value: String,
    #[prop_or_default]
    pub value_class: Option<&'static str>,
}

pub struct StatCard;

impl Component for StatCard {
    type Message = ();
    type Properties = StatCardProps;

    fn create(_ctx: &Context<Self>) -> Self {
        StatCard
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="stat-card">
                <div class="stat-label">{ props.label }</div>
                <div class={yew::classes!("stat-value", props.value_class)}>{ props.value.clone() }</div>
            </div>
        }
    }
}
