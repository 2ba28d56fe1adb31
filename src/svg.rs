use crate::grid::{CellKind, Pos};
use crate::plan::Plan;
use crate::problem::Problem;
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Path, Rectangle, Text};

const CELL: f64 = 40.0;
const ROBOT_COLORS: [&str; 3] = ["#e04040", "#3070e0", "#30a040"];

fn center(p: Pos) -> (f64, f64) {
    (
        p.col as f64 * CELL + CELL / 2.0,
        p.row as f64 * CELL + CELL / 2.0,
    )
}

/// Draws the board and, if given, the path of every robot.
pub fn render(problem: &Problem, plan: Option<&Plan>) -> String {
    let grid = &problem.grid;
    let width = grid.width() as f64 * CELL;
    let height = grid.height() as f64 * CELL;

    let mut document = Document::new()
        .set("width", width + 20.0)
        .set("height", height + 20.0)
        .set("viewBox", (-10.0, -10.0, width + 20.0, height + 20.0));

    for i in 0..grid.cell_count() {
        let p = grid.pos_of(i);
        let fill = match grid.classify(p) {
            CellKind::Blocked => "#404040",
            _ => "#ffffff",
        };
        let rect = Rectangle::new()
            .set("x", p.col as f64 * CELL)
            .set("y", p.row as f64 * CELL)
            .set("width", CELL)
            .set("height", CELL)
            .set("fill", fill)
            .set("stroke", "#c0c0c0")
            .set("stroke-width", 1);
        document = document.add(rect);
    }

    if let Some(plan) = plan {
        for (robot, moves) in plan.actions.iter().enumerate() {
            let mut pos = problem.starts[robot];
            let (x, y) = center(pos);
            let mut data = Data::new().move_to((x, y));
            for &m in moves {
                pos = pos.shifted(m);
                let (x, y) = center(pos);
                data = data.line_to((x, y));
            }
            let path = Path::new()
                .set("fill", "none")
                .set("stroke", ROBOT_COLORS[robot % ROBOT_COLORS.len()])
                .set("stroke-width", 4)
                .set("stroke-opacity", 0.6)
                .set("d", data)
                .set("title", format!("robot {}: {} steps", robot, moves.len()));
            document = document.add(path);
        }
    }

    for robot in 0..problem.robot_count {
        let color = ROBOT_COLORS[robot % ROBOT_COLORS.len()];
        let (sx, sy) = center(problem.starts[robot]);
        let circle = Circle::new()
            .set("cx", sx)
            .set("cy", sy)
            .set("r", CELL * 0.35)
            .set("fill", color)
            .set("stroke", "black")
            .set("stroke-width", 2);
        document = document.add(circle);

        let (gx, gy) = center(problem.goals[robot]);
        let goal = Rectangle::new()
            .set("x", gx - CELL * 0.35)
            .set("y", gy - CELL * 0.35)
            .set("width", CELL * 0.7)
            .set("height", CELL * 0.7)
            .set("fill", "none")
            .set("stroke", color)
            .set("stroke-width", 3);
        document = document.add(goal);

        for (label, (x, y)) in [
            (CellKind::RobotStart(robot).to_char(), (sx, sy)),
            (CellKind::RobotGoal(robot).to_char(), (gx, gy)),
        ] {
            let text = Text::new(label.to_string())
                .set("x", x)
                .set("y", y + 6.0)
                .set("text-anchor", "middle")
                .set("font-size", "18px");
            document = document.add(text);
        }
    }

    document.to_string()
}
