//! Schematic descriptors.
//!
//! Every generated artifact kind (controller, service, module, …) is one
//! [`Schematic`] row: a kind, the base directory it lives under, a file
//! extension, and a fixed content template. A single generator in
//! `application::services::generate_service` consumes these rows, so adding
//! a kind means adding a row, not a new generator.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::{DomainError, Naming, RenderContext};

/// The kinds of artifact `generate` can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchematicKind {
    Controller,
    Service,
    Module,
    View,
    Middleware,
    Guard,
    Filter,
    Pipe,
}

impl SchematicKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::Service => "service",
            Self::Module => "module",
            Self::View => "view",
            Self::Middleware => "middleware",
            Self::Guard => "guard",
            Self::Filter => "filter",
            Self::Pipe => "pipe",
        }
    }

    /// Short alias accepted on the command line (`g c user`).
    pub fn alias(self) -> &'static str {
        match self {
            Self::Controller => "c",
            Self::Service => "s",
            Self::Module => "m",
            Self::View => "v",
            Self::Middleware => "c-m",
            Self::Guard => "c-g",
            Self::Filter => "c-f",
            Self::Pipe => "c-p",
        }
    }

    /// Row in [`SCHEMATICS`]; rows are ordered like the variants.
    pub fn schematic(self) -> &'static Schematic {
        let index = match self {
            Self::Controller => 0,
            Self::Service => 1,
            Self::Module => 2,
            Self::View => 3,
            Self::Middleware => 4,
            Self::Guard => 5,
            Self::Filter => 6,
            Self::Pipe => 7,
        };
        &SCHEMATICS[index]
    }
}

impl fmt::Display for SchematicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchematicKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Schematic::all()
            .iter()
            .map(|schematic| schematic.kind)
            .find(|kind| kind.as_str() == wanted || kind.alias() == wanted)
            .ok_or_else(|| DomainError::UnknownSchematic { name: s.into() })
    }
}

/// Top-level directory under `src/` a schematic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseDir {
    Modules,
    Components,
}

impl BaseDir {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Modules => "modules",
            Self::Components => "components",
        }
    }
}

/// Options for a single `generate` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub name: String,
    /// Explicit directory, relative to the project root.
    pub path: Option<PathBuf>,
    pub flat: bool,
    pub skip_import: bool,
    /// Emit a re-export line instead of an import line.
    pub export: bool,
}

impl GenerateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Declarative description of one artifact kind.
#[derive(Debug)]
pub struct Schematic {
    pub kind: SchematicKind,
    pub base: BaseDir,
    pub extension: &'static str,
    template: &'static str,
}

/// Every schematic, in the order they are listed to users.
pub static SCHEMATICS: [Schematic; 8] = [
    Schematic {
        kind: SchematicKind::Controller,
        base: BaseDir::Modules,
        extension: "ts",
        template: CONTROLLER_TEMPLATE,
    },
    Schematic {
        kind: SchematicKind::Service,
        base: BaseDir::Modules,
        extension: "ts",
        template: SERVICE_TEMPLATE,
    },
    Schematic {
        kind: SchematicKind::Module,
        base: BaseDir::Modules,
        extension: "ts",
        template: MODULE_TEMPLATE,
    },
    Schematic {
        kind: SchematicKind::View,
        base: BaseDir::Modules,
        extension: "tsx",
        template: VIEW_TEMPLATE,
    },
    Schematic {
        kind: SchematicKind::Middleware,
        base: BaseDir::Components,
        extension: "ts",
        template: MIDDLEWARE_TEMPLATE,
    },
    Schematic {
        kind: SchematicKind::Guard,
        base: BaseDir::Components,
        extension: "ts",
        template: GUARD_TEMPLATE,
    },
    Schematic {
        kind: SchematicKind::Filter,
        base: BaseDir::Components,
        extension: "ts",
        template: FILTER_TEMPLATE,
    },
    Schematic {
        kind: SchematicKind::Pipe,
        base: BaseDir::Components,
        extension: "ts",
        template: PIPE_TEMPLATE,
    },
];

impl Schematic {
    pub fn all() -> &'static [Schematic] {
        &SCHEMATICS
    }

    /// Name of the exported class, e.g. `UserController` or `UsersModule`.
    pub fn class_name(&self, naming: &Naming) -> String {
        match self.kind {
            SchematicKind::Module => naming.module_name(),
            SchematicKind::Controller => naming.controller_name(),
            SchematicKind::Service => naming.service_name(),
            SchematicKind::View => naming.view_name(),
            SchematicKind::Middleware => naming.suffixed("Middleware"),
            SchematicKind::Guard => naming.suffixed("Guard"),
            SchematicKind::Filter => naming.suffixed("Filter"),
            SchematicKind::Pipe => naming.suffixed("Pipe"),
        }
    }

    /// `<file>.<kind>.<ext>`, e.g. `users.controller.ts`.
    pub fn file_name(&self, naming: &Naming) -> String {
        format!("{}.{}.{}", naming.file_name(), self.kind, self.extension)
    }

    /// Directory the file is written to.
    ///
    /// Explicit `path` > `src/<base>/<plural>/` > flat `src/`.
    pub fn target_dir(&self, project_root: &Path, options: &GenerateOptions, naming: &Naming) -> PathBuf {
        if let Some(path) = &options.path {
            return project_root.join(path);
        }
        if !options.flat {
            return project_root
                .join("src")
                .join(self.base.as_str())
                .join(naming.plural_file_name());
        }
        project_root.join("src")
    }

    /// Module specifier relative to `src/`, without extension.
    pub fn import_path(&self, options: &GenerateOptions, naming: &Naming) -> String {
        let stem = format!("{}.{}", naming.file_name(), self.kind);
        if let Some(path) = &options.path {
            let dir = normalize_import_dir(path);
            return if dir.is_empty() {
                format!("./{stem}")
            } else {
                format!("./{dir}/{stem}")
            };
        }
        if options.flat {
            format!("./{stem}")
        } else {
            format!(
                "./{}/{}/{stem}",
                self.base.as_str(),
                naming.plural_file_name()
            )
        }
    }

    /// The line a caller should splice into their entry point.
    pub fn import_statement(&self, options: &GenerateOptions, naming: &Naming) -> String {
        let class = self.class_name(naming);
        let path = self.import_path(options, naming);
        if options.export {
            format!("export {{ default as {class} }} from '{path}';")
        } else {
            format!("import {class} from '{path}';")
        }
    }

    /// Render the file body for `naming`.
    pub fn render(&self, naming: &Naming) -> String {
        self.context(naming).render(self.template)
    }

    fn context(&self, naming: &Naming) -> RenderContext {
        RenderContext::new()
            .with_variable("TypeName", self.class_name(naming))
            .with_variable("ClassName", naming.class_name())
            .with_variable("PluralClassName", naming.plural_class_name())
            .with_variable("PLURAL_CLASS_NAME", naming.plural_class_name().to_uppercase())
            .with_variable("ServiceName", naming.service_name())
            .with_variable("ControllerName", naming.controller_name())
            .with_variable("ViewName", naming.view_name())
            .with_variable("fileName", naming.file_name())
            .with_variable("pluralFileName", naming.plural_file_name())
            .with_variable("singularVar", naming.singular_variable_name())
            .with_variable("pluralVar", naming.plural_variable_name())
    }
}

/// Turn a user-supplied directory into an import prefix relative to `src/`.
fn normalize_import_dir(path: &Path) -> String {
    let joined = path
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>();
    let parts: &[String] = match joined.first() {
        Some(first) if first == "src" => &joined[1..],
        _ => &joined,
    };
    parts.join("/")
}

// ── Content templates ─────────────────────────────────────────────────────────

const CONTROLLER_TEMPLATE: &str = r#"import { Body, Controller, Delete, Get, Param, Patch, Post, Put } from 'honestjs'
import { NotFoundException } from 'http-essentials'
import {{ServiceName}} from './{{fileName}}.service'

interface Create{{ClassName}}Dto {
	name: string
	email: string
}

interface {{ClassName}} {
	id: number
	name: string
	email: string
	role: 'user' | 'admin'
}

@Controller('/{{pluralFileName}}')
class {{TypeName}} {
	constructor(private readonly {{singularVar}}Service: {{ServiceName}}) {}

	@Post()
	async create{{ClassName}}(@Body() body: Create{{ClassName}}Dto): Promise<{{ClassName}}> {
		return await this.{{singularVar}}Service.create(body)
	}

	@Get()
	async get{{PluralClassName}}(): Promise<{{ClassName}}[]> {
		return await this.{{singularVar}}Service.findAll()
	}

	@Get('/:id')
	async get{{ClassName}}(@Param('id') id: number): Promise<{{ClassName}}> {
		const {{singularVar}} = await this.{{singularVar}}Service.findById(Number(id))
		if (!{{singularVar}}) {
			throw new NotFoundException('{{ClassName}} not found')
		}
		return {{singularVar}}
	}

	@Put('/:id')
	async update{{ClassName}}(@Param('id') id: number, @Body() body: Partial<Create{{ClassName}}Dto>): Promise<{{ClassName}}> {
		const updated{{ClassName}} = await this.{{singularVar}}Service.update(Number(id), body)
		if (!updated{{ClassName}}) {
			throw new NotFoundException('{{ClassName}} not found')
		}
		return updated{{ClassName}}
	}

	@Patch('/:id')
	async patch{{ClassName}}(@Param('id') id: number, @Body() body: Partial<Create{{ClassName}}Dto>): Promise<{{ClassName}}> {
		const updated{{ClassName}} = await this.{{singularVar}}Service.update(Number(id), body)
		if (!updated{{ClassName}}) {
			throw new NotFoundException('{{ClassName}} not found')
		}
		return updated{{ClassName}}
	}

	@Delete('/:id')
	async delete{{ClassName}}(@Param('id') id: number): Promise<boolean> {
		const deleted = await this.{{singularVar}}Service.delete(Number(id))
		if (!deleted) {
			throw new NotFoundException('{{ClassName}} not found')
		}
		return deleted
	}
}

export default {{TypeName}}
"#;

const SERVICE_TEMPLATE: &str = r#"import { Service } from 'honestjs'

interface Create{{ClassName}}Dto {
	name: string
	email: string
}

interface {{ClassName}} {
	id: number
	name: string
	email: string
	role: 'user' | 'admin'
}

@Service()
class {{TypeName}} {
	private {{pluralVar}}: {{ClassName}}[] = [
		{ id: 1, name: 'John', email: 'john@mail.com', role: 'admin' },
		{ id: 2, name: 'Jane', email: 'jane@mail.com', role: 'admin' }
	]

	async create({{singularVar}}: Create{{ClassName}}Dto): Promise<{{ClassName}}> {
		const id = this.{{pluralVar}}.length + 1
		this.{{pluralVar}}.push({
			id,
			name: {{singularVar}}.name,
			email: {{singularVar}}.email,
			role: 'user'
		})
		return this.{{pluralVar}}[id - 1]
	}

	async findAll(): Promise<{{ClassName}}[]> {
		return this.{{pluralVar}}
	}

	async findById(id: number): Promise<{{ClassName}} | null> {
		return this.{{pluralVar}}.find(({{singularVar}}) => {{singularVar}}.id === id) || null
	}

	async update(id: number, {{singularVar}}Data: Partial<{{ClassName}}>): Promise<{{ClassName}} | null> {
		const {{singularVar}}Index = this.{{pluralVar}}.findIndex(({{singularVar}}) => {{singularVar}}.id === id)
		if ({{singularVar}}Index === -1) return null

		this.{{pluralVar}}[{{singularVar}}Index] = { ...this.{{pluralVar}}[{{singularVar}}Index], ...{{singularVar}}Data }
		return this.{{pluralVar}}[{{singularVar}}Index]
	}

	async delete(id: number): Promise<boolean> {
		const {{singularVar}}Index = this.{{pluralVar}}.findIndex(({{singularVar}}) => {{singularVar}}.id === id)
		if ({{singularVar}}Index === -1) return false

		this.{{pluralVar}}.splice({{singularVar}}Index, 1)
		return true
	}
}

export default {{TypeName}}
"#;

const MODULE_TEMPLATE: &str = r#"import { MvcModule } from 'honestjs'
import {{ControllerName}} from './{{fileName}}.controller'
import {{ServiceName}} from './{{fileName}}.service'
import {{ViewName}} from './{{fileName}}.view'

@MvcModule({
	views: [{{ViewName}}],
	controllers: [{{ControllerName}}],
	services: [{{ServiceName}}]
})
class {{TypeName}} {}

export default {{TypeName}}
"#;

const VIEW_TEMPLATE: &str = r#"import { Ctx, Page, View } from 'honestjs'
import type { Context } from 'hono'
import type { FC } from 'hono/jsx'
import {{ServiceName}} from './{{fileName}}.service'

interface {{ClassName}} {
	id: number
	name: string
	email: string
	role: 'user' | 'admin'
}

interface {{ClassName}}ListProps {
	{{pluralVar}}: {{ClassName}}[]
}

const {{ClassName}}List: FC<{{ClassName}}ListProps> = ({ {{pluralVar}} }) => {
	return (
		<div>
			<h2>{{PluralClassName}}</h2>
			<ul>
				{{{pluralVar}}.map(({{singularVar}}) => (
					<li key={{{singularVar}}.id}>
						{{{singularVar}}.name} - {{{singularVar}}.email}
					</li>
				))}
			</ul>
		</div>
	)
}

@View('/{{pluralFileName}}')
class {{TypeName}} {
	stylesheets: string[] = ['/static/css/views/{{fileName}}.css']
	scripts: string[] = ['/static/js/views/{{fileName}}.js']

	constructor(private readonly {{singularVar}}Service: {{ServiceName}}) {}

	@Page()
	async index(@Ctx() ctx: Context) {
		const {{pluralVar}} = await this.{{singularVar}}Service.findAll()
		return ctx.render(<{{ClassName}}List {{pluralVar}}={{{pluralVar}}} />, {
			title: '[ {{PLURAL_CLASS_NAME}} ]',
			description: 'List of {{pluralVar}}',
			stylesheets: this.stylesheets,
			scripts: this.scripts
		})
	}
}

export default {{TypeName}}
"#;

const MIDDLEWARE_TEMPLATE: &str = r#"import type { IMiddleware } from 'honestjs'
import type { Context, Next } from 'hono'

export class {{TypeName}} implements IMiddleware {
	async use(c: Context, next: Next) {
		console.log(`[${c.req.method}] ${c.req.url} - Request received`)

		await next()

		console.log(`Response status: ${c.res.status}`)
	}
}

export default {{TypeName}}
"#;

const GUARD_TEMPLATE: &str = r#"import type { IGuard } from 'honestjs'
import type { Context } from 'hono'

export class {{TypeName}} implements IGuard {
	async canActivate(c: Context): Promise<boolean> {
		const authHeader = c.req.header('Authorization')

		return !!authHeader
	}
}

export default {{TypeName}}
"#;

const FILTER_TEMPLATE: &str = r#"import { IFilter } from 'honestjs'
import { Context } from 'hono'
import { NotFoundException } from 'http-essentials'

export class {{TypeName}} implements IFilter<NotFoundException> {
	catch(exception: NotFoundException, context: Context) {
		if (exception instanceof NotFoundException) {
			context.status(404)
			return context.json({
				statusCode: 404,
				message: 'The requested resource was not found.',
				error: 'Not Found',
				timestamp: new Date().toISOString(),
				path: context.req.path,
			})
		}

		throw exception
	}
}

export default {{TypeName}}
"#;

const PIPE_TEMPLATE: &str = r#"import { IPipe, ArgumentMetadata } from 'honestjs'
import { BadRequestException } from 'http-essentials'

export class {{TypeName}} implements IPipe<string> {
	transform(value: string, metadata: ArgumentMetadata): number {
		const val = parseInt(value, 10)

		if (isNaN(val)) {
			throw new BadRequestException('Validation failed: not a number')
		}

		return val
	}
}

export default {{TypeName}}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Naming {
        Naming::new("user")
    }

    #[test]
    fn kinds_parse_from_names_and_aliases() {
        assert_eq!("controller".parse::<SchematicKind>().unwrap(), SchematicKind::Controller);
        assert_eq!("C".parse::<SchematicKind>().unwrap(), SchematicKind::Controller);
        assert_eq!("c-m".parse::<SchematicKind>().unwrap(), SchematicKind::Middleware);
        assert_eq!("Pipe".parse::<SchematicKind>().unwrap(), SchematicKind::Pipe);
        assert!(matches!(
            "widget".parse::<SchematicKind>(),
            Err(DomainError::UnknownSchematic { .. })
        ));
    }

    #[test]
    fn every_kind_has_a_descriptor() {
        for schematic in Schematic::all() {
            assert_eq!(schematic.kind.schematic().kind, schematic.kind);
        }
    }

    #[test]
    fn file_names_follow_kind_and_extension() {
        assert_eq!(SchematicKind::Controller.schematic().file_name(&user()), "users.controller.ts");
        assert_eq!(SchematicKind::View.schematic().file_name(&user()), "users.view.tsx");
        assert_eq!(SchematicKind::Pipe.schematic().file_name(&user()), "users.pipe.ts");
    }

    #[test]
    fn target_dir_precedence() {
        let root = Path::new("/project");
        let schematic = SchematicKind::Guard.schematic();
        let mut opts = GenerateOptions::new("auth");
        let naming = Naming::new("auth");

        assert_eq!(
            schematic.target_dir(root, &opts, &naming),
            PathBuf::from("/project/src/components/auths")
        );

        opts.flat = true;
        assert_eq!(schematic.target_dir(root, &opts, &naming), PathBuf::from("/project/src"));

        opts.path = Some(PathBuf::from("lib/security"));
        assert_eq!(
            schematic.target_dir(root, &opts, &naming),
            PathBuf::from("/project/lib/security")
        );
    }

    #[test]
    fn import_statements() {
        let schematic = SchematicKind::Module.schematic();
        let mut opts = GenerateOptions::new("user");
        assert_eq!(
            schematic.import_statement(&opts, &user()),
            "import UsersModule from './modules/users/users.module';"
        );

        opts.flat = true;
        assert_eq!(
            schematic.import_statement(&opts, &user()),
            "import UsersModule from './users.module';"
        );

        opts.export = true;
        assert_eq!(
            schematic.import_statement(&opts, &user()),
            "export { default as UsersModule } from './users.module';"
        );
    }

    #[test]
    fn import_path_for_explicit_directory_drops_src_prefix() {
        let schematic = SchematicKind::Service.schematic();
        let mut opts = GenerateOptions::new("user");
        opts.path = Some(PathBuf::from("src/features/accounts"));
        assert_eq!(
            schematic.import_path(&opts, &user()),
            "./features/accounts/users.service"
        );
    }

    #[test]
    fn rendered_bodies_have_no_leftover_placeholders() {
        for schematic in Schematic::all() {
            let body = schematic.render(&Naming::new("category"));
            for token in ["{{TypeName}}", "{{ClassName}}", "{{pluralVar}}", "{{singularVar}}", "{{fileName}}"] {
                assert!(!body.contains(token), "{} left {token}", schematic.kind);
            }
            assert!(body.contains(&format!("export default {}", schematic.class_name(&Naming::new("category")))));
        }
    }

    #[test]
    fn view_body_keeps_jsx_expressions() {
        let body = SchematicKind::View.schematic().render(&user());
        assert!(body.contains("{users.map((user) => ("));
        assert!(body.contains("<li key={user.id}>"));
        assert!(body.contains("<UserList users={users} />"));
        assert!(body.contains("title: '[ USERS ]'"));
    }

    #[test]
    fn controller_body_wires_the_service() {
        let body = SchematicKind::Controller.schematic().render(&user());
        assert!(body.contains("import UserService from './users.service'"));
        assert!(body.contains("@Controller('/users')"));
        assert!(body.contains("class UserController {"));
        assert!(body.contains("async getUsers(): Promise<User[]>"));
    }
}
